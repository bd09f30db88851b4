//! Monitor state and single-tick behavior without a bus.
use super::*;
use crate::core::PerformanceSample;
use crate::protocol::gateway::RawGateway;

type NoBus = RawGateway<tokio::io::DuplexStream>;

fn monitor() -> EfficiencyMonitor {
    EfficiencyMonitor::new(
        MonitorConfig::default(),
        BoatPerformance::sister_ship().unwrap(),
    )
}

#[test]
/// Every clone of the flag observes the request.
fn test_shutdown_flag_is_shared() {
    let flag = ShutdownFlag::new();
    let clone = flag.clone();
    assert!(!clone.is_requested());
    flag.request();
    assert!(clone.is_requested());

    let monitor = monitor();
    let copy = monitor.clone();
    monitor.shutdown_flag().request();
    assert!(copy.shutdown_flag().is_requested());
}

#[tokio::test(start_paused = true)]
/// Averages inside the window are rated against the polar.
async fn test_evaluate() {
    let monitor = monitor();
    let now = Instant::now();
    assert_eq!(monitor.evaluate(now), None);

    monitor
        .aggregator()
        .ingest(PerformanceSample::new(6.6, 44.0, 11.0, now));
    monitor
        .aggregator()
        .ingest(PerformanceSample::new(7.0, 46.0, 13.0, now));

    let report = monitor.evaluate(now).unwrap();
    assert_eq!(report.average.samples, 2);
    assert!((report.average.tws - 12.0).abs() < 1e-12);
    assert!((report.average.twa - 45.0).abs() < 1e-12);
    let expected = BoatPerformance::sister_ship()
        .unwrap()
        .efficiency(12.0, 45.0, 6.8)
        .unwrap();
    assert!((report.efficiency.percent - expected.percent).abs() < 1e-9);

    // Ten seconds later the samples have left the window.
    assert_eq!(monitor.evaluate(now + Duration::from_secs(11)), None);
}

#[tokio::test(start_paused = true)]
/// Without samples nothing is computed; without a bus nothing is sent.
async fn test_transmit_tick_without_bus() {
    let monitor = monitor();
    assert_eq!(monitor.transmit_tick::<NoBus>(None).await, TickOutcome::NoData);

    monitor
        .aggregator()
        .ingest(PerformanceSample::new(7.04, 90.0, 12.0, Instant::now()));
    match monitor.transmit_tick::<NoBus>(None).await {
        TickOutcome::MonitorOnly(report) => {
            assert!((report.efficiency.percent - 100.0).abs() < 1e-9);
        }
        other => panic!("unexpected {other:?}"),
    }
    // No record was encoded.
    assert_eq!(monitor.sequence().peek(), 0);
}
