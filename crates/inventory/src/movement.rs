use serde_json::Value as JsonValue;

use estoque_core::{DomainError, DomainResult};

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockDirection {
    /// `entrada` — units received into the inventory.
    Inbound,
    /// `saida` — units leaving the inventory.
    Outbound,
}

/// Validated stock movement: a direction plus a strictly positive amount.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StockMovement {
    pub direction: StockDirection,
    pub amount: i64,
}

impl StockMovement {
    /// Validate the client-submitted `tipo`/`quantidade` pair.
    ///
    /// The amount is checked before the direction; a request that is wrong
    /// on both counts reports the amount problem.
    pub fn parse(kind: &JsonValue, amount: &JsonValue) -> DomainResult<Self> {
        let amount = match amount.as_i64() {
            Some(amount) if amount > 0 => amount,
            _ => {
                return Err(DomainError::validation(
                    "A quantidade deve ser um número inteiro positivo.",
                ));
            }
        };

        let direction = match kind.as_str() {
            Some("entrada") => StockDirection::Inbound,
            Some("saida") => StockDirection::Outbound,
            _ => {
                return Err(DomainError::validation(
                    "Tipo de operação inválida. Use 'entrada' ou 'saida'.",
                ));
            }
        };

        Ok(Self { direction, amount })
    }

    /// Compute the quantity after applying this movement.
    ///
    /// An outbound movement larger than the current quantity fails with
    /// `InsufficientStock`; the caller must leave the stored value untouched.
    pub fn apply(&self, current: i64) -> DomainResult<i64> {
        match self.direction {
            StockDirection::Inbound => Ok(current + self.amount),
            StockDirection::Outbound if self.amount > current => Err(DomainError::InsufficientStock {
                available: current,
                requested: self.amount,
            }),
            StockDirection::Outbound => Ok(current - self.amount),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_accepts_both_directions() {
        let inbound = StockMovement::parse(&json!("entrada"), &json!(10)).unwrap();
        assert_eq!(inbound.direction, StockDirection::Inbound);
        assert_eq!(inbound.amount, 10);

        let outbound = StockMovement::parse(&json!("saida"), &json!(3)).unwrap();
        assert_eq!(outbound.direction, StockDirection::Outbound);
    }

    #[test]
    fn parse_rejects_non_positive_or_fractional_amounts() {
        for amount in [json!(0), json!(-5), json!(2.5), json!("10")] {
            let err = StockMovement::parse(&json!("entrada"), &amount).unwrap_err();
            assert_eq!(
                err,
                DomainError::validation("A quantidade deve ser um número inteiro positivo.")
            );
        }
    }

    #[test]
    fn parse_rejects_unknown_directions() {
        let err = StockMovement::parse(&json!("transferencia"), &json!(1)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("Tipo de operação inválida. Use 'entrada' ou 'saida'.")
        );
    }

    #[test]
    fn amount_problems_are_reported_before_direction_problems() {
        let err = StockMovement::parse(&json!("transferencia"), &json!(0)).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("A quantidade deve ser um número inteiro positivo.")
        );
    }

    #[test]
    fn inbound_adds_and_outbound_subtracts() {
        let inbound = StockMovement { direction: StockDirection::Inbound, amount: 10 };
        assert_eq!(inbound.apply(5).unwrap(), 15);

        let outbound = StockMovement { direction: StockDirection::Outbound, amount: 5 };
        assert_eq!(outbound.apply(15).unwrap(), 10);
    }

    #[test]
    fn outbound_can_drain_the_stock_to_zero() {
        let outbound = StockMovement { direction: StockDirection::Outbound, amount: 7 };
        assert_eq!(outbound.apply(7).unwrap(), 0);
    }

    #[test]
    fn outbound_beyond_stock_is_insufficient() {
        let outbound = StockMovement { direction: StockDirection::Outbound, amount: 999 };
        let err = outbound.apply(10).unwrap_err();
        assert_eq!(err, DomainError::InsufficientStock { available: 10, requested: 999 });
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Applying any valid movement to a non-negative quantity never
            /// produces a negative quantity.
            #[test]
            fn applied_movements_never_go_negative(
                current in 0i64..10_000,
                amount in 1i64..10_000,
                outbound in proptest::bool::ANY,
            ) {
                let movement = StockMovement {
                    direction: if outbound { StockDirection::Outbound } else { StockDirection::Inbound },
                    amount,
                };

                match movement.apply(current) {
                    Ok(next) => prop_assert!(next >= 0),
                    Err(DomainError::InsufficientStock { available, requested }) => {
                        prop_assert!(outbound && amount > current);
                        prop_assert_eq!(available, current);
                        prop_assert_eq!(requested, amount);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                }
            }

            /// A quantity stays non-negative across any sequence of applied
            /// movements when rejected movements leave it unchanged.
            #[test]
            fn movement_sequences_preserve_non_negative_quantity(
                initial in 0i64..1_000,
                steps in proptest::collection::vec((1i64..100, proptest::bool::ANY), 0..50),
            ) {
                let mut quantity = initial;
                for (amount, outbound) in steps {
                    let movement = StockMovement {
                        direction: if outbound { StockDirection::Outbound } else { StockDirection::Inbound },
                        amount,
                    };
                    if let Ok(next) = movement.apply(quantity) {
                        quantity = next;
                    }
                    prop_assert!(quantity >= 0);
                }
            }

            /// Movement application is deterministic.
            #[test]
            fn apply_is_deterministic(current in 0i64..10_000, amount in 1i64..10_000) {
                let movement = StockMovement { direction: StockDirection::Outbound, amount };
                prop_assert_eq!(movement.apply(current), movement.apply(current));
            }
        }
    }
}
