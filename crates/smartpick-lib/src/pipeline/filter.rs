use tracing::debug;

use crate::catalog::{Catalog, PhoneRecord};
use crate::query::{PriceDirection, QueryConstraints};

/// First catalog brand whose lowercase name occurs in `query`.
///
/// Brands are scanned in first-seen dataset order, so the result is stable
/// for a given dataset. Only one brand can match.
pub fn matched_brand<'a>(catalog: &'a Catalog, query: &str) -> Option<&'a str> {
    let query = query.to_lowercase();
    catalog
        .brands()
        .iter()
        .find(|brand| !brand.is_empty() && query.contains(&brand.to_lowercase()))
        .map(String::as_str)
}

/// Narrow the catalog to the phones that satisfy `query`.
pub fn filter_phones<'a>(
    catalog: &'a Catalog,
    constraints: &QueryConstraints,
    query: &str,
) -> Vec<&'a PhoneRecord> {
    let brand = matched_brand(catalog, query);
    let rows = apply_constraints(catalog.records(), brand, constraints);
    debug!(
        brand = ?brand,
        constraints = ?constraints,
        candidates = catalog.len(),
        survivors = rows.len(),
        "Filtered catalog"
    );
    rows
}

/// Apply the brand restriction followed by every numeric threshold.
///
/// The price filter applies only when the query named a direction; RAM,
/// battery, camera and rear-camera thresholds always apply, using their
/// defaults when unstated. Rows with an empty cell in a filtered column are
/// dropped. Order is preserved and the operation is idempotent.
pub fn apply_constraints<'a, I>(
    rows: I,
    brand: Option<&str>,
    constraints: &QueryConstraints,
) -> Vec<&'a PhoneRecord>
where
    I: IntoIterator<Item = &'a PhoneRecord>,
{
    let price_bound = constraints.price_bound();
    rows.into_iter()
        .filter(|r| brand.is_none_or(|b| r.is_brand(b)))
        .filter(|r| match price_bound {
            None => true,
            Some((PriceDirection::AtMost, limit)) => r.price.is_some_and(|p| p <= f64::from(limit)),
            Some((PriceDirection::AtLeast, limit)) => {
                r.price.is_some_and(|p| p >= f64::from(limit))
            }
        })
        .filter(|r| at_least(r.ram_capacity, constraints.min_ram_gb()))
        .filter(|r| at_least(r.battery_capacity, constraints.min_battery_mah()))
        .filter(|r| at_least(r.primary_camera_rear, constraints.min_camera_mp()))
        .filter(|r| at_least(r.num_rear_cameras, constraints.min_rear_cameras()))
        .collect()
}

fn at_least(value: Option<f64>, min: u32) -> bool {
    value.is_some_and(|v| v >= f64::from(min))
}
