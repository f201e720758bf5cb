//! Wager argument parsing

/// Parses the wager a user typed after the command.
///
/// Accepted shapes: `all`, a percentage `1%`..=`100%` of `total_balance`
/// (floored), or a positive integer. Anything else yields `None`.
pub fn entered_points(total_balance: i64, arg: &str) -> Option<i64> {
    if arg == "all" {
        return Some(total_balance);
    }

    if let Some(percent) = parse_percent(arg) {
        let points = i128::from(total_balance) * i128::from(percent) / 100;
        return i64::try_from(points).ok();
    }

    if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        return arg.parse::<i64>().ok().filter(|points| *points > 0);
    }

    None
}

/// `N%` with one to three digits and `1 <= N <= 100`
fn parse_percent(arg: &str) -> Option<i64> {
    let digits = arg.strip_suffix('%')?;
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    digits.parse::<i64>().ok().filter(|p| (1..=100).contains(p))
}
