use core::str::FromStr;

use serde::{Deserialize, Serialize};

use beerstock_core::{BeerId, DomainError, DomainResult, Entity};

/// Longest accepted `name`/`brand`, in characters.
pub const MAX_TEXT_LEN: usize = 200;

/// Closed set of beer styles.
///
/// Both serde and [`FromStr`] accept only the UPPERCASE names (`"LAGER"`).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BeerType {
    Lager,
    Malzbier,
    Witbier,
    Weiss,
    Ale,
    Ipa,
    Stout,
}

impl BeerType {
    pub const ALL: [BeerType; 7] = [
        BeerType::Lager,
        BeerType::Malzbier,
        BeerType::Witbier,
        BeerType::Weiss,
        BeerType::Ale,
        BeerType::Ipa,
        BeerType::Stout,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BeerType::Lager => "LAGER",
            BeerType::Malzbier => "MALZBIER",
            BeerType::Witbier => "WITBIER",
            BeerType::Weiss => "WEISS",
            BeerType::Ale => "ALE",
            BeerType::Ipa => "IPA",
            BeerType::Stout => "STOUT",
        }
    }
}

impl core::fmt::Display for BeerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BeerType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BeerType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown beer type: {s}")))
    }
}

/// A beer record as held by the store.
///
/// At rest, `0 <= quantity <= max` always holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beer {
    pub id: BeerId,
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl Entity for Beer {
    type Id = BeerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// A beer record before the store has assigned it an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBeer {
    pub name: String,
    pub brand: String,
    pub max: i64,
    pub quantity: i64,
    #[serde(rename = "type")]
    pub beer_type: BeerType,
}

impl NewBeer {
    /// Check the field constraints a record must satisfy before it is stored.
    pub fn validate(&self) -> DomainResult<()> {
        validate_text("name", &self.name)?;
        validate_text("brand", &self.brand)?;

        if self.max <= 0 {
            return Err(DomainError::validation("max must be greater than zero"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if self.quantity > self.max {
            return Err(DomainError::validation(format!(
                "quantity {} cannot exceed max {}",
                self.quantity, self.max
            )));
        }
        Ok(())
    }

    /// Attach a store-assigned id.
    pub fn with_id(self, id: BeerId) -> Beer {
        Beer {
            id,
            name: self.name,
            brand: self.brand,
            max: self.max,
            quantity: self.quantity,
            beer_type: self.beer_type,
        }
    }
}

fn validate_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > MAX_TEXT_LEN {
        return Err(DomainError::validation(format!(
            "{field} cannot exceed {MAX_TEXT_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject zero and negative amounts.
///
/// Negative amounts are not treated as the inverse operation. There is no
/// upper cap here: only the record's `max` bounds an increment.
pub fn validate_amount(amount: i64) -> DomainResult<()> {
    if amount <= 0 {
        return Err(DomainError::validation("quantity must be greater than zero"));
    }
    Ok(())
}

/// Direction of a stock change.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StockAdjustment {
    Increment,
    Decrement,
}

impl StockAdjustment {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockAdjustment::Increment => "increment",
            StockAdjustment::Decrement => "decrement",
        }
    }
}

impl Beer {
    /// Return the record with `amount` added to its stock.
    pub fn increment(&self, amount: i64) -> DomainResult<Beer> {
        self.adjust(StockAdjustment::Increment, amount)
    }

    /// Return the record with `amount` removed from its stock.
    pub fn decrement(&self, amount: i64) -> DomainResult<Beer> {
        self.adjust(StockAdjustment::Decrement, amount)
    }

    /// Apply a stock change, enforcing `0 <= quantity <= max`.
    ///
    /// This does not mutate `self`; the caller decides whether to persist the
    /// returned record.
    pub fn adjust(&self, adjustment: StockAdjustment, amount: i64) -> DomainResult<Beer> {
        validate_amount(amount)?;

        let new_quantity = match adjustment {
            StockAdjustment::Increment => self.quantity.checked_add(amount),
            StockAdjustment::Decrement => self.quantity.checked_sub(amount),
        };

        let new_quantity = match new_quantity {
            Some(q) if q > self.max => {
                return Err(DomainError::stock_exceeded(format!(
                    "cannot increment beer {} by {amount}: quantity {q} would exceed max {}",
                    self.id, self.max
                )));
            }
            Some(q) if q < 0 => {
                return Err(DomainError::stock_exceeded(format!(
                    "cannot decrement beer {} by {amount}: only {} in stock",
                    self.id, self.quantity
                )));
            }
            Some(q) => q,
            None => {
                return Err(DomainError::stock_exceeded(format!(
                    "cannot {} beer {} by {amount}: quantity out of range",
                    adjustment.as_str(),
                    self.id
                )));
            }
        };

        Ok(Beer {
            quantity: new_quantity,
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skol() -> NewBeer {
        NewBeer {
            name: "Skol".to_string(),
            brand: "Ambev".to_string(),
            max: 50,
            quantity: 10,
            beer_type: BeerType::Lager,
        }
    }

    fn stored_skol() -> Beer {
        skol().with_id(BeerId::new(1))
    }

    #[test]
    fn valid_beer_passes_validation() {
        skol().validate().unwrap();
    }

    #[test]
    fn validation_rejects_blank_name() {
        let beer = NewBeer {
            name: "   ".to_string(),
            ..skol()
        };

        let err = beer.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("name")),
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn validation_rejects_blank_brand() {
        let beer = NewBeer {
            brand: String::new(),
            ..skol()
        };

        let err = beer.validate().unwrap_err();
        match err {
            DomainError::Validation(msg) => assert!(msg.contains("brand")),
            _ => panic!("Expected Validation error for blank brand"),
        }
    }

    #[test]
    fn validation_rejects_overlong_name() {
        let beer = NewBeer {
            name: "x".repeat(MAX_TEXT_LEN + 1),
            ..skol()
        };

        assert!(matches!(beer.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validation_rejects_non_positive_max() {
        let beer = NewBeer {
            max: 0,
            quantity: 0,
            ..skol()
        };

        assert!(matches!(beer.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validation_rejects_quantity_above_max() {
        let beer = NewBeer {
            max: 5,
            quantity: 6,
            ..skol()
        };

        assert!(matches!(beer.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validation_rejects_negative_quantity() {
        let beer = NewBeer {
            quantity: -1,
            ..skol()
        };

        assert!(matches!(beer.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn validation_accepts_large_initial_quantity_within_max() {
        let beer = NewBeer {
            max: 500,
            quantity: 150,
            ..skol()
        };

        beer.validate().unwrap();
    }

    #[test]
    fn increment_within_bounds_adds_amount() {
        let beer = stored_skol();

        let updated = beer.increment(10).unwrap();

        assert_eq!(updated.quantity, 20);
        assert_eq!(updated.id, beer.id);
        assert_eq!(updated.name, beer.name);
        // The original record is untouched.
        assert_eq!(beer.quantity, 10);
    }

    #[test]
    fn increment_up_to_max_is_allowed() {
        let updated = stored_skol().increment(40).unwrap();
        assert_eq!(updated.quantity, 50);
    }

    #[test]
    fn increment_past_max_fails() {
        let err = stored_skol().increment(45).unwrap_err();
        match err {
            DomainError::StockExceeded(msg) => assert!(msg.contains("max 50")),
            _ => panic!("Expected StockExceeded error"),
        }
    }

    #[test]
    fn decrement_within_bounds_subtracts_amount() {
        let updated = stored_skol().decrement(5).unwrap();
        assert_eq!(updated.quantity, 5);
    }

    #[test]
    fn decrement_to_zero_is_allowed() {
        let updated = stored_skol().decrement(10).unwrap();
        assert_eq!(updated.quantity, 0);
    }

    #[test]
    fn decrement_below_zero_fails() {
        let err = stored_skol().decrement(11).unwrap_err();
        assert!(matches!(err, DomainError::StockExceeded(_)));
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        let beer = stored_skol();
        assert!(matches!(beer.increment(0), Err(DomainError::Validation(_))));
        assert!(matches!(beer.increment(-5), Err(DomainError::Validation(_))));
        assert!(matches!(beer.decrement(0), Err(DomainError::Validation(_))));
        assert!(matches!(beer.decrement(-5), Err(DomainError::Validation(_))));
    }

    #[test]
    fn large_amounts_are_bounded_only_by_max() {
        let beer = Beer {
            max: 1_000,
            quantity: 0,
            ..stored_skol()
        };

        assert_eq!(beer.increment(150).unwrap().quantity, 150);
        assert!(matches!(
            beer.increment(2_000),
            Err(DomainError::StockExceeded(_))
        ));
        assert!(matches!(
            beer.increment(i64::MAX),
            Err(DomainError::StockExceeded(_))
        ));
    }

    #[test]
    fn beer_type_round_trips_through_str() {
        for t in BeerType::ALL {
            assert_eq!(t.as_str().parse::<BeerType>().unwrap(), t);
        }
        assert!("PILSNER".parse::<BeerType>().is_err());
    }

    #[test]
    fn beer_type_parsing_matches_wire_format() {
        assert!("ipa".parse::<BeerType>().is_err());
        assert!(serde_json::from_str::<BeerType>("\"ipa\"").is_err());
        assert_eq!(
            serde_json::from_str::<BeerType>("\"IPA\"").unwrap(),
            "IPA".parse::<BeerType>().unwrap()
        );
    }

    #[test]
    fn beer_serializes_with_type_field() {
        let json = serde_json::to_value(stored_skol()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "Skol");
        assert_eq!(json["type"], "LAGER");
        assert_eq!(json["max"], 50);
        assert_eq!(json["quantity"], 10);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn beer_with(max: i64, quantity: i64) -> Beer {
            Beer {
                max,
                quantity,
                ..stored_skol()
            }
        }

        proptest! {
            /// Property: increment succeeds exactly when the result stays within max.
            #[test]
            fn increment_respects_max(
                (max, quantity) in (1i64..=1_000).prop_flat_map(|m| (Just(m), 0..=m)),
                amount in 1i64..=2_000,
            ) {
                let beer = beer_with(max, quantity);
                match beer.increment(amount) {
                    Ok(updated) => {
                        prop_assert!(quantity + amount <= max);
                        prop_assert_eq!(updated.quantity, quantity + amount);
                    }
                    Err(DomainError::StockExceeded(_)) => prop_assert!(quantity + amount > max),
                    Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                }
            }

            /// Property: decrement succeeds exactly when the result stays non-negative.
            #[test]
            fn decrement_respects_zero(
                (max, quantity) in (1i64..=1_000).prop_flat_map(|m| (Just(m), 0..=m)),
                amount in 1i64..=2_000,
            ) {
                let beer = beer_with(max, quantity);
                match beer.decrement(amount) {
                    Ok(updated) => {
                        prop_assert!(quantity - amount >= 0);
                        prop_assert_eq!(updated.quantity, quantity - amount);
                    }
                    Err(DomainError::StockExceeded(_)) => prop_assert!(quantity - amount < 0),
                    Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                }
            }

            /// Property: any successful adjustment keeps the record within bounds.
            #[test]
            fn adjustments_preserve_bounds(
                (max, quantity) in (1i64..=1_000).prop_flat_map(|m| (Just(m), 0..=m)),
                steps in proptest::collection::vec((any::<bool>(), 1i64..=2_000), 0..20),
            ) {
                let mut beer = beer_with(max, quantity);
                for (up, amount) in steps {
                    let next = if up { beer.increment(amount) } else { beer.decrement(amount) };
                    if let Ok(next) = next {
                        beer = next;
                    }
                    prop_assert!(beer.quantity >= 0 && beer.quantity <= beer.max);
                }
            }
        }
    }
}
