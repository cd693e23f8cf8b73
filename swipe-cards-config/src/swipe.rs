use knuffel::errors::DecodeError;

/// Drag decision and settle tunables.
#[derive(knuffel::Decode, Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    /// Fraction of the card width a drag must strictly exceed to dismiss the card.
    #[knuffel(child, unwrap(argument), default = Self::default().commit_threshold)]
    pub commit_threshold: FloatOrInt<0, 1>,
    /// Each released frame closes `1 / settle_divisor` of the remaining distance.
    #[knuffel(child, unwrap(argument), default = Self::default().settle_divisor)]
    pub settle_divisor: FloatOrInt<1, 1000>,
    /// Extra distance, on top of the removed card's height, trailing cards slide up from.
    #[knuffel(child, unwrap(argument), default = Self::default().reflow_gap)]
    pub reflow_gap: FloatOrInt<0, 10000>,
}

impl Default for Swipe {
    fn default() -> Self {
        Self {
            commit_threshold: FloatOrInt(0.35),
            settle_divisor: FloatOrInt(4.),
            reflow_gap: FloatOrInt(20.),
        }
    }
}

/// A number that may be written as either an integer or a decimal, limited to `MIN..=MAX`.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct FloatOrInt<const MIN: i32, const MAX: i32>(pub f64);

impl<const MIN: i32, const MAX: i32> FloatOrInt<MIN, MAX> {
    fn check(value: f64) -> Result<Self, String> {
        if (f64::from(MIN)..=f64::from(MAX)).contains(&value) {
            Ok(Self(value))
        } else {
            Err(format!("value must be between {MIN} and {MAX}"))
        }
    }
}

impl<S: knuffel::traits::ErrorSpan, const MIN: i32, const MAX: i32> knuffel::DecodeScalar<S>
    for FloatOrInt<MIN, MAX>
{
    fn type_check(
        type_name: &Option<knuffel::span::Spanned<knuffel::ast::TypeName, S>>,
        ctx: &mut knuffel::decode::Context<S>,
    ) {
        if let Some(type_name) = &type_name {
            ctx.emit_error(DecodeError::unexpected(
                type_name,
                "type name",
                "no type name expected for this node",
            ));
        }
    }

    fn raw_decode(
        val: &knuffel::span::Spanned<knuffel::ast::Literal, S>,
        ctx: &mut knuffel::decode::Context<S>,
    ) -> Result<Self, DecodeError<S>> {
        let value = match &**val {
            knuffel::ast::Literal::Int(ref value) => match value.try_into() {
                Ok(v) => {
                    let v: i32 = v;
                    f64::from(v)
                }
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    return Ok(Self::default());
                }
            },
            knuffel::ast::Literal::Decimal(ref value) => match value.try_into() {
                Ok(v) => v,
                Err(e) => {
                    ctx.emit_error(DecodeError::conversion(val, e));
                    return Ok(Self::default());
                }
            },
            _ => {
                ctx.emit_error(DecodeError::scalar_kind(
                    knuffel::decode::Kind::Decimal,
                    val,
                ));
                return Ok(Self::default());
            }
        };

        match Self::check(value) {
            Ok(v) => Ok(v),
            Err(msg) => {
                ctx.emit_error(DecodeError::conversion(val, msg));
                Ok(Self::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        assert_eq!(FloatOrInt::<0, 1>::check(0.), Ok(FloatOrInt(0.)));
        assert_eq!(FloatOrInt::<0, 1>::check(1.), Ok(FloatOrInt(1.)));
        assert!(FloatOrInt::<0, 1>::check(1.01).is_err());
        assert!(FloatOrInt::<1, 1000>::check(-3.).is_err());
    }
}
