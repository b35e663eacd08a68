use crate::error::MatchSkip;
use crate::models::{Criteria, Listing};
use tracing::debug;

/// Check a listing against the price ceiling and room minimum.
///
/// Missing data fails closed. A zero price or room count counts as missing,
/// as does an empty location. Size bounds, furnishing, pets and availability
/// are not considered even when the criteria carry them.
pub fn evaluate(listing: &Listing, criteria: &Criteria) -> Result<(), MatchSkip> {
    let price = listing
        .price
        .filter(|p| *p > 0)
        .ok_or(MatchSkip::MissingPrice)?;
    let bedrooms = listing
        .bedrooms
        .filter(|b| *b > 0)
        .ok_or(MatchSkip::MissingBedrooms)?;
    listing
        .location
        .as_deref()
        .filter(|l| !l.is_empty())
        .ok_or(MatchSkip::MissingLocation)?;

    if price > criteria.max_price {
        return Err(MatchSkip::PriceAboveCeiling {
            price,
            max_price: criteria.max_price,
        });
    }
    if bedrooms < criteria.min_bedrooms {
        return Err(MatchSkip::TooFewBedrooms {
            bedrooms,
            min_bedrooms: criteria.min_bedrooms,
        });
    }

    Ok(())
}

pub fn matches(listing: &Listing, criteria: &Criteria) -> bool {
    match evaluate(listing, criteria) {
        Ok(()) => true,
        Err(skip) => {
            debug!("Rejected '{}': {}", listing.title, skip);
            false
        }
    }
}

/// Keep the listings that pass, preserving their order
pub fn filter_matching(listings: Vec<Listing>, criteria: &Criteria) -> Vec<Listing> {
    listings
        .into_iter()
        .filter(|listing| matches(listing, criteria))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn criteria() -> Criteria {
        Criteria::new("Copenhagen", 19000, 2).unwrap()
    }

    fn listing(price: Option<u64>, bedrooms: Option<u32>) -> Listing {
        Listing {
            title: "Flat".to_string(),
            price,
            location: Some("Copenhagen".to_string()),
            size_m2: None,
            bedrooms,
            property_type: "apartment".to_string(),
            listing_url: None,
        }
    }

    #[test]
    fn price_above_ceiling_is_rejected() {
        assert_eq!(
            evaluate(&listing(Some(19500), Some(2)), &criteria()),
            Err(MatchSkip::PriceAboveCeiling {
                price: 19500,
                max_price: 19000
            })
        );
    }

    #[test]
    fn extra_rooms_are_accepted() {
        assert!(matches(&listing(Some(18000), Some(3)), &criteria()));
    }

    #[test]
    fn price_equal_to_ceiling_is_accepted() {
        assert!(matches(&listing(Some(19000), Some(2)), &criteria()));
    }

    #[test]
    fn too_few_rooms_is_rejected() {
        assert_eq!(
            evaluate(&listing(Some(10000), Some(1)), &criteria()),
            Err(MatchSkip::TooFewBedrooms {
                bedrooms: 1,
                min_bedrooms: 2
            })
        );
    }

    #[test]
    fn missing_fields_fail_closed() {
        let loose = Criteria::new("Copenhagen", u64::MAX, 0).unwrap();

        assert_eq!(evaluate(&listing(None, Some(3)), &loose), Err(MatchSkip::MissingPrice));
        assert_eq!(evaluate(&listing(Some(100), None), &loose), Err(MatchSkip::MissingBedrooms));

        let mut nowhere = listing(Some(100), Some(3));
        nowhere.location = None;
        assert_eq!(evaluate(&nowhere, &loose), Err(MatchSkip::MissingLocation));

        nowhere.location = Some(String::new());
        assert!(!matches(&nowhere, &loose));
    }

    #[test]
    fn zero_values_count_as_missing() {
        let loose = Criteria::new("Copenhagen", 50000, 0).unwrap();
        assert!(!matches(&listing(Some(0), Some(2)), &loose));
        assert!(!matches(&listing(Some(5000), Some(0)), &loose));
    }

    #[test]
    fn optional_criteria_are_ignored() {
        let mut strict = criteria().with_min_size(200);
        strict.max_size_m2 = Some(210);
        strict.pets_allowed = Some(true);
        strict.furnished = Some(true);

        let mut small = listing(Some(15000), Some(2));
        small.size_m2 = Some(40);
        assert!(matches(&small, &strict));
    }

    #[test]
    fn filter_keeps_order() {
        let mut a = listing(Some(10000), Some(2));
        a.title = "A".into();
        let b = listing(Some(25000), Some(2));
        let mut c = listing(Some(12000), Some(4));
        c.title = "C".into();

        let kept = filter_matching(vec![a, b, c], &criteria());
        let titles: Vec<_> = kept.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "C"]);
    }
}
