//! Danish display formatting for prices, stock and timestamps.
//!
//! Timestamps arrive in UTC and are shown in `Europe/Copenhagen` local time.

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Copenhagen;
use chrono_tz::Tz;
use foodwaste_core::StockUnit;
use rust_decimal::{Decimal, RoundingStrategy};

/// Converts a UTC instant to Copenhagen local time.
#[must_use]
pub fn local_time(ts: DateTime<Utc>) -> DateTime<Tz> {
    ts.with_timezone(&Copenhagen)
}

/// Formats an amount with a decimal comma and `.` thousands separators,
/// e.g. `1.234,50 kr.` for DKK or `12,00 EUR` for other currencies.
#[must_use]
pub fn format_price(amount: Decimal, currency: &str) -> String {
    let suffix = if currency.eq_ignore_ascii_case("DKK") {
        "kr."
    } else {
        currency
    };
    format!("{} {suffix}", danish_number(amount, 2))
}

/// Formats a whole-percent discount as `-NN%`.
#[must_use]
pub fn format_discount(percent: i64) -> String {
    format!("-{percent}%")
}

/// Formats a stock indicator with its Danish unit: `3 stk.`, `1,50 kg`.
#[must_use]
pub fn format_stock(stock: Decimal, unit: &StockUnit) -> String {
    let amount = match unit {
        StockUnit::Kilogram => danish_number(stock, 2),
        _ if stock.fract().is_zero() => stock.trunc().normalize().to_string(),
        _ => stock.normalize().to_string().replace('.', ","),
    };
    format!("{amount} {}", unit.label())
}

/// Formats an expiry time relative to `now`: `i dag kl. 21:59`,
/// `i morgen kl. 08:00`, otherwise `03.03.2024 kl. 12:00`.
#[must_use]
pub fn format_expiry(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let local = local_time(ts);
    let today = local_time(now).date_naive();
    let clock = local.format("%H:%M");

    if local.date_naive() == today {
        format!("i dag kl. {clock}")
    } else if today.succ_opt() == Some(local.date_naive()) {
        format!("i morgen kl. {clock}")
    } else {
        format_timestamp(ts)
    }
}

/// Formats an instant as `DD.MM.YYYY kl. HH:MM` in Copenhagen time.
#[must_use]
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    local_time(ts).format("%d.%m.%Y kl. %H:%M").to_string()
}

fn danish_number(amount: Decimal, decimals: u32) -> String {
    let rounded = amount.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped},{frac_part}")
    }
}
