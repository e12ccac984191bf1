//! Tests for cycle execution and the poll loop

use super::*;
use crate::app::services::poller::Poller;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

const KJFK_1051: &str = "KJFK 181051Z 30010KT 10SM FEW250 11/M02 A3013";
const KJFK_1151: &str = "KJFK 181151Z 31012KT 10SM FEW250 12/M01 A3012";
const EGLL_1150: &str = "EGLL 181150Z 24008KT 9999 SCT035 13/09 Q1009";
const EGLL_1220: &str = "EGLL 181220Z 25010KT 9999 SCT035 14/09 Q1008";

fn source_with_both_hours() -> FakeSource {
    FakeSource::new()
        .with_bulletin("11", &["2024/10/18 11:00", KJFK_1051, ""])
        .with_bulletin("12", &["2024/10/18 12:00", KJFK_1151, "", EGLL_1150, ""])
}

fn poller(source: FakeSource) -> Poller<FakeSource, RecordingSink> {
    Poller::new(source, RecordingSink::new(), "metar")
}

#[tokio::test]
async fn test_first_cycle_writes_every_station() {
    let mut poller = poller(source_with_both_hours());

    let report = poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(report.hours, ("11".to_string(), "12".to_string()));
    assert_eq!(report.stations, 2);
    assert_eq!(report.deltas, 2);
    assert_eq!(report.records, 2);

    let batches = poller.sink().batches();
    assert_eq!(batches.len(), 1);

    let stations: Vec<_> = batches[0].iter().filter_map(|r| r.station_id()).collect();
    assert_eq!(stations, vec!["EGLL", "KJFK"]);
}

#[tokio::test]
async fn test_current_hour_report_supersedes_previous_hour() {
    let mut poller = poller(source_with_both_hours());

    poller.run_cycle(cycle_time()).await.unwrap();

    let kjfk = poller.previous().get("KJFK").unwrap();
    assert_eq!(
        kjfk.time,
        Some(Utc.with_ymd_and_hms(2024, 10, 18, 11, 51, 0).unwrap())
    );

    let batches = poller.sink().batches();
    let record = batches[0]
        .iter()
        .find(|r| r.station_id() == Some("KJFK"))
        .unwrap();
    assert_eq!(record.time(), "2024-10-18T11:51:00Z");
    assert!((record.fields["temp"] - 285.15).abs() < 1e-9);
    assert!((record.fields["wind_dir"] - 310.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_fetch_order_previous_then_current() {
    let mut poller = poller(source_with_both_hours());

    poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(poller.source().requested(), vec!["11", "12"]);
}

#[tokio::test]
async fn test_unchanged_cycle_skips_write() {
    let mut poller = poller(source_with_both_hours());

    poller.run_cycle(cycle_time()).await.unwrap();
    let report = poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(report.deltas, 0);
    assert_eq!(report.records, 0);
    assert_eq!(poller.sink().batches().len(), 1);
}

#[tokio::test]
async fn test_only_updated_station_is_written() {
    let mut poller = poller(source_with_both_hours());
    poller.run_cycle(cycle_time()).await.unwrap();

    poller
        .source()
        .set_bulletin("12", &["2024/10/18 12:00", KJFK_1151, "", EGLL_1220, ""]);
    let report = poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(report.records, 1);
    let batches = poller.sink().batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[1][0].station_id(), Some("EGLL"));
    assert_eq!(batches[1][0].time(), "2024-10-18T12:20:00Z");
}

#[tokio::test]
async fn test_fetch_failure_keeps_snapshot() {
    let mut poller = poller(source_with_both_hours());
    poller.run_cycle(cycle_time()).await.unwrap();
    let before = poller.previous().clone();

    poller.source().set_failing(true);
    let result = poller.run_cycle(cycle_time()).await;

    assert!(result.unwrap_err().is_fetch());
    assert_eq!(poller.previous(), &before);
    assert_eq!(poller.sink().batches().len(), 1);
    assert_eq!(poller.stats().fetch_failures, 1);
}

#[tokio::test]
async fn test_fetch_failure_on_first_cycle_leaves_snapshot_empty() {
    let source = source_with_both_hours();
    source.set_failing(true);
    let mut poller = poller(source);

    assert!(poller.run_cycle(cycle_time()).await.is_err());
    assert!(poller.previous().is_empty());
    assert!(poller.sink().batches().is_empty());
}

#[tokio::test]
async fn test_write_failure_still_advances_snapshot() {
    let mut poller = poller(source_with_both_hours());
    poller.sink().set_failing(true);

    let result = poller.run_cycle(cycle_time()).await;

    assert!(result.unwrap_err().is_write());
    assert_eq!(poller.previous().len(), 2);
    assert_eq!(poller.stats().write_failures, 1);
    assert_eq!(poller.stats().records_dropped, 2);

    // The failed records are not offered again
    poller.sink().set_failing(false);
    let report = poller.run_cycle(cycle_time()).await.unwrap();
    assert_eq!(report.records, 0);
    assert_eq!(poller.sink().batches().len(), 1);
}

#[tokio::test]
async fn test_untimed_and_empty_reports_are_not_written() {
    let source = FakeSource::new().with_bulletin(
        "12",
        &[
            "2024/10/18 12:00",
            "KXYZ 31012KT 12/M01",
            "",
            "2024/10/18 12:00",
            "EDDF 181150Z NIL",
            "",
        ],
    );
    let mut poller = poller(source);

    let report = poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(report.stations, 2);
    assert_eq!(report.deltas, 1);
    assert_eq!(report.records, 0);
    assert_eq!(report.skipped_empty, 1);
    assert!(poller.sink().batches().is_empty());
    assert!(poller.previous().contains("KXYZ"));
}

#[tokio::test]
async fn test_bad_lines_do_not_fail_cycle() {
    let source = FakeSource::new().with_bulletin(
        "12",
        &["2024/10/18 12:00", "not a metar", "", KJFK_1151, "KJFK 189999Z"],
    );
    let mut poller = poller(source);

    let report = poller.run_cycle(cycle_time()).await.unwrap();

    assert_eq!(report.build.parse_failures, 2);
    assert_eq!(report.records, 1);
}

#[tokio::test]
async fn test_run_stops_when_cancelled_before_start() {
    let mut poller = poller(source_with_both_hours());
    let cancel = CancellationToken::new();
    cancel.cancel();

    let stats = poller.run(Duration::from_secs(1), cancel).await.unwrap();

    assert_eq!(stats.cycles, 0);
    assert!(poller.source().requested().is_empty());
}

#[tokio::test]
async fn test_run_cancellation_interrupts_sleep() {
    let mut poller = poller(source_with_both_hours());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let stats = tokio::time::timeout(
        Duration::from_secs(5),
        poller.run(Duration::from_secs(3600), cancel),
    )
    .await
    .expect("run loop did not observe cancellation")
    .unwrap();

    assert_eq!(stats.cycles, 1);
    assert_eq!(stats.records_written, 2);
    assert_eq!(stats.successful_cycles(), 1);
}

#[tokio::test]
async fn test_run_survives_failing_cycles() {
    let source = source_with_both_hours();
    source.set_failing(true);
    let mut poller = poller(source);
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let stats = poller
        .run(Duration::from_millis(10), cancel)
        .await
        .unwrap();

    assert!(stats.cycles >= 2);
    assert_eq!(stats.fetch_failures, stats.cycles);
}
