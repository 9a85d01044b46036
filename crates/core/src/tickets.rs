//! Seat validation for tickets.

use crate::error::CoreError;

/// Check that `row` and `seat` address a real seat in a hall of
/// `hall_rows` x `seats_in_row`. Both coordinates are 1-based.
pub fn validate_seat(row: i32, seat: i32, hall_rows: i32, seats_in_row: i32) -> Result<(), CoreError> {
    if !(1..=hall_rows).contains(&row) {
        return Err(CoreError::Validation(format!(
            "row must be in range [1, {hall_rows}], got {row}"
        )));
    }
    if !(1..=seats_in_row).contains(&seat) {
        return Err(CoreError::Validation(format!(
            "seat must be in range [1, {seats_in_row}], got {seat}"
        )));
    }
    Ok(())
}

/// Reject a batch that books the same `(session, row, seat)` more than once.
pub fn ensure_unique_seats(seats: &[(i64, i32, i32)]) -> Result<(), CoreError> {
    for (i, seat) in seats.iter().enumerate() {
        if seats[..i].contains(seat) {
            let (session, row, place) = seat;
            return Err(CoreError::Validation(format!(
                "seat {place} in row {row} of movie session {session} is listed twice"
            )));
        }
    }
    Ok(())
}

/// Reject a `rows` x `seats_in_row` layout that would leave sold tickets
/// outside the hall. `furthest_sold` is the highest `(row, seat)` sold so
/// far, taken independently per axis.
pub fn ensure_layout_covers_sold(
    rows: i32,
    seats_in_row: i32,
    furthest_sold: Option<(i32, i32)>,
) -> Result<(), CoreError> {
    let Some((max_row, max_seat)) = furthest_sold else {
        return Ok(());
    };
    if rows < max_row {
        return Err(CoreError::Validation(format!(
            "rows cannot be {rows}: tickets are already sold in row {max_row}"
        )));
    }
    if seats_in_row < max_seat {
        return Err(CoreError::Validation(format!(
            "seats_in_row cannot be {seats_in_row}: tickets are already sold for seat {max_seat}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn seat_inside_hall_is_valid() {
        assert!(validate_seat(1, 1, 10, 12).is_ok());
        assert!(validate_seat(10, 12, 10, 12).is_ok());
    }

    #[test]
    fn row_out_of_range() {
        assert_matches!(validate_seat(0, 1, 10, 12), Err(CoreError::Validation(msg)) if msg.contains("row"));
        assert_matches!(validate_seat(11, 1, 10, 12), Err(CoreError::Validation(_)));
    }

    #[test]
    fn seat_out_of_range() {
        assert_matches!(validate_seat(1, 13, 10, 12), Err(CoreError::Validation(msg)) if msg.contains("seat"));
        assert_matches!(validate_seat(1, -1, 10, 12), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duplicate_seats_in_one_order() {
        assert!(ensure_unique_seats(&[(1, 1, 1), (1, 1, 2), (2, 1, 1)]).is_ok());
        assert_matches!(
            ensure_unique_seats(&[(1, 3, 4), (1, 3, 4)]),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn layout_without_sales_accepts_any_size() {
        assert!(ensure_layout_covers_sold(1, 1, None).is_ok());
    }

    #[test]
    fn layout_must_cover_furthest_sold_seat() {
        assert!(ensure_layout_covers_sold(2, 3, Some((2, 3))).is_ok());
        assert!(ensure_layout_covers_sold(5, 5, Some((2, 3))).is_ok());
        assert_matches!(
            ensure_layout_covers_sold(1, 3, Some((2, 3))),
            Err(CoreError::Validation(msg)) if msg.contains("rows")
        );
        assert_matches!(
            ensure_layout_covers_sold(2, 2, Some((2, 3))),
            Err(CoreError::Validation(msg)) if msg.contains("seats_in_row")
        );
    }
}
