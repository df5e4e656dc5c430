//! Running-average maintenance for store star ratings
//!
//! A store keeps the average grade of the reviews it lists instead of
//! rescanning them. Each function takes the stored average and the number of
//! reviews it was computed over, and returns the average after one mutation.
//! A store with no reviews has an average of 0.

/// Lowest grade a review may carry
pub const MIN_GRADE: i32 = 1;

/// Highest grade a review may carry
pub const MAX_GRADE: i32 = 5;

/// Checks that `grade` is within `MIN_GRADE..=MAX_GRADE`
pub fn validate_grade(grade: i32) -> Result<i32, String> {
    if (MIN_GRADE..=MAX_GRADE).contains(&grade) {
        Ok(grade)
    } else {
        Err(format!(
            "Grade must be between {} and {}, got {}",
            MIN_GRADE, MAX_GRADE, grade
        ))
    }
}

/// Average after a review with `grade` joins `count` existing reviews
pub fn average_after_add(average: f64, count: usize, grade: i32) -> f64 {
    let count = count as f64;
    (average * count + f64::from(grade)) / (count + 1.0)
}

/// Average after one of `count` reviews changes from `previous` to `grade`
///
/// The review stays counted, so the divisor does not change. With no counted
/// reviews there is nothing to adjust and the average is 0.
pub fn average_after_edit(average: f64, count: usize, previous: i32, grade: i32) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let count = count as f64;
    (average * count - f64::from(previous) + f64::from(grade)) / count
}

/// Average after a review with `grade` leaves a set of `count` reviews
///
/// Removing the last review resets the average to 0.
pub fn average_after_remove(average: f64, count: usize, grade: i32) -> f64 {
    if count <= 1 {
        return 0.0;
    }
    let count = count as f64;
    (average * count - f64::from(grade)) / (count - 1.0)
}
