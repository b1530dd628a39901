//! Derived attributes.

use tpt_model::{AgeGroup, AgeGroupDetail};

/// Nine-band age group. Boundary ages belong to the higher band.
///
/// # Examples
///
/// ```
/// use tpt_model::AgeGroupDetail;
/// use tpt_transform::age_group_detail;
///
/// assert_eq!(age_group_detail(4), AgeGroupDetail::Under5);
/// assert_eq!(age_group_detail(5), AgeGroupDetail::From5To9);
/// assert_eq!(age_group_detail(65), AgeGroupDetail::From65);
/// ```
pub fn age_group_detail(age: u32) -> AgeGroupDetail {
    AgeGroupDetail::ALL
        .into_iter()
        .rev()
        .find(|band| age >= band.lower_bound())
        .unwrap_or(AgeGroupDetail::Under5)
}

/// Four-band age group printed on the register, for rows that leave the
/// column blank.
pub fn broad_age_group(age: u32) -> AgeGroup {
    match age {
        0..=4 => AgeGroup::Under5,
        5..=14 => AgeGroup::From5To14,
        15..=60 => AgeGroup::From15To60,
        _ => AgeGroup::Over60,
    }
}

/// Year in which an enrollment's outcome is evaluated.
///
/// A six-month regimen started in year `Y` has its outcome reported in
/// `Y + 1`. Cleaning rejects `i32::MAX`, so the result is always `year + 1`
/// for loaded records.
pub fn reported_year(year: i32) -> i32 {
    year.saturating_add(1)
}
