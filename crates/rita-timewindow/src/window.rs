//! Beacon and true analysis windows (§4.7), both derived from
//! `metadatabase.min_max` rows for a dataset.

use rita_error::{Error, Result};
use rita_metadata::query_min_max;
use rita_store::Session;
use rita_types::timestamp::{TimestampUs, DAY_US};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min_ts: TimestampUs,
    pub max_ts: TimestampUs,
    pub use_current_time: bool,
}

/// `min-ts = max(raw-min-ts, max-ts - 24h)`, `max-ts = raw-max-ts`, capped
/// to a trailing 24 hours regardless of the dataset's actual span.
fn capped_window(raw_min: TimestampUs, raw_max: TimestampUs) -> Result<Window> {
    if raw_min.is_zero() || raw_max.is_zero() {
        return Err(Error::InvalidMinMaxTimestamp { dataset: String::new() });
    }
    let floor = raw_max.saturating_sub_us(DAY_US);
    let min_ts = if floor.0 > raw_min.0 { floor } else { raw_min };
    Ok(Window { min_ts, max_ts: raw_max, use_current_time: false })
}

fn with_dataset(mut err: Error, dataset: &str) -> Error {
    if let Error::InvalidMinMaxTimestamp { dataset: d } = &mut err {
        *d = dataset.to_string();
    }
    err
}

/// The beacon window: the `beacon = true` subset of `min_max` for
/// `dataset`, under the dataset's `rolling` discriminator.
///
/// # Errors
/// `Error::InvalidDatabaseConnection` if `session` is `None`;
/// `Error::InvalidMinMaxTimestamp` if no row exists or either endpoint is
/// the zero timestamp.
pub async fn beacon_window(session: Option<&Session>, dataset: &str, rolling: bool) -> Result<Window> {
    let session = session.ok_or_else(|| Error::InvalidDatabaseConnection { dataset: dataset.to_string() })?;
    let row = query_min_max(session, dataset, rolling, true)
        .await?
        .ok_or_else(|| Error::InvalidMinMaxTimestamp { dataset: dataset.to_string() })?;
    capped_window(row.min_ts, row.max_ts).map_err(|e| with_dataset(e, dataset))
}

/// The true window: the same formula over every row (beacon or not),
/// plus the `useCurrentTime` flag (rolling dataset whose max-ts is within
/// 24h of wall-clock now).
///
/// # Errors
/// Same as [`beacon_window`].
pub async fn true_window(session: Option<&Session>, dataset: &str, rolling: bool) -> Result<Window> {
    let session = session.ok_or_else(|| Error::InvalidDatabaseConnection { dataset: dataset.to_string() })?;
    let row = query_min_max(session, dataset, rolling, false)
        .await?
        .ok_or_else(|| Error::InvalidMinMaxTimestamp { dataset: dataset.to_string() })?;
    let mut window = capped_window(row.min_ts, row.max_ts).map_err(|e| with_dataset(e, dataset))?;
    let now = TimestampUs::now();
    window.use_current_time = rolling && (now - window.max_ts) <= DAY_US;
    Ok(window)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caps_window_to_24h_when_span_is_wider() {
        let raw_min = TimestampUs(0 + 1);
        let raw_max = TimestampUs(10 * DAY_US);
        let w = capped_window(raw_min, raw_max).unwrap();
        assert_eq!(w.max_ts, raw_max);
        assert_eq!(w.min_ts, raw_max.saturating_sub_us(DAY_US));
    }

    #[test]
    fn keeps_raw_min_when_span_is_under_24h() {
        let raw_min = TimestampUs(DAY_US);
        let raw_max = TimestampUs(DAY_US + 100);
        let w = capped_window(raw_min, raw_max).unwrap();
        assert_eq!(w.min_ts, raw_min);
    }

    #[test]
    fn zero_endpoint_is_rejected() {
        let err = capped_window(TimestampUs(0), TimestampUs(100)).unwrap_err();
        assert!(matches!(err, Error::InvalidMinMaxTimestamp { .. }));
    }
}
