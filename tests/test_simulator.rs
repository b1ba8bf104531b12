use quantum_sentinel::simulator::machine::{BAR_REVEAL_DELAY, COUNTER_TICK, LOADING_DELAY, SCANNING_DELAY};
use quantum_sentinel::simulator::{
    Category, RiskDescription, ScanEvent, ScanSimulator, ScanState, StatusBanner, ThreatColor,
};
use quantum_sentinel::SentinelError;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_report_scenario_end_to_end() {
    let mut sim = ScanSimulator::new(StdRng::seed_from_u64(2024));

    let session = sim.submit("report.apk").unwrap();
    assert_eq!(session.state, ScanState::Loading);
    assert!(session.dashboard.loading_visible);
    assert!(!session.dashboard.active);

    sim.advance_by(LOADING_DELAY);
    let session = sim.session().unwrap();
    assert_eq!(session.state, ScanState::Scanning);
    assert!(!session.dashboard.loading_visible);
    assert_eq!(session.dashboard.core_label.as_deref(), Some("SCANNING..."));
    assert!(!session.dashboard.active);

    sim.advance_by(SCANNING_DELAY);
    let session = sim.session().unwrap();
    assert_eq!(session.state, ScanState::Revealing);
    assert!(session.dashboard.active);
    let report = session.dashboard.report.unwrap();
    let target = session.dashboard.overall_score.unwrap();
    assert_eq!(target, report.overall_score());
    assert!((50..=99).contains(&target));
    assert_eq!(session.dashboard.bars.len(), 6);
    assert!(session.dashboard.bars.iter().all(|bar| bar.width.is_none()));
    let activated_at = sim.now();

    sim.advance_by(BAR_REVEAL_DELAY - ms(1));
    assert!(!sim.session().unwrap().dashboard.bars_revealed());
    sim.advance_by(ms(1));
    let dashboard = &sim.session().unwrap().dashboard;
    assert!(dashboard.bars_revealed());
    for bar in &dashboard.bars {
        assert_eq!(bar.value, report.get(bar.category));
        assert_eq!(bar.width, Some(bar.value));
        assert_eq!(bar.description, Some(RiskDescription::for_level(bar.value)));
    }

    // a target of 50 finishes together with the bar reveal
    let finish = activated_at + COUNTER_TICK * target;
    if finish > sim.now() {
        sim.advance_to(finish - ms(1));
        assert_eq!(sim.session().unwrap().dashboard.counter, target - 1);
        assert_eq!(sim.state(), ScanState::Revealing);
    }

    sim.advance_to(finish);
    let dashboard = &sim.session().unwrap().dashboard;
    assert_eq!(dashboard.counter, target);
    assert_eq!(dashboard.banner, Some(StatusBanner::for_score(target)));
    assert_eq!(dashboard.ring_color, ThreatColor::for_level(target));
    assert_eq!(sim.state(), ScanState::Complete);
    assert_eq!(sim.next_deadline(), None);
}

#[test]
fn test_state_sequence_never_skips() {
    let mut sim = ScanSimulator::new(StdRng::seed_from_u64(5));
    sim.submit("app.apk").unwrap();
    sim.run_to_completion();

    let transitions: Vec<(ScanState, ScanState, Duration)> = sim
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            ScanEvent::StateChanged { from, to, at, .. } => Some((from, to, at)),
            _ => None,
        })
        .collect();

    let target = sim.session().unwrap().dashboard.overall_score.unwrap();
    assert_eq!(
        transitions,
        vec![
            (ScanState::Idle, ScanState::Loading, ms(0)),
            (ScanState::Loading, ScanState::Scanning, ms(3000)),
            (ScanState::Scanning, ScanState::Revealing, ms(4000)),
            (
                ScanState::Revealing,
                ScanState::Complete,
                ms(4000) + COUNTER_TICK * target
            ),
        ]
    );
}

#[test]
fn test_ring_tracks_counter() {
    let mut sim = ScanSimulator::new(StdRng::seed_from_u64(11));
    sim.submit("app.apk").unwrap();
    sim.advance_to(ms(4000) + COUNTER_TICK * 40);

    let dashboard = &sim.session().unwrap().dashboard;
    assert_eq!(dashboard.counter, 40);
    assert_eq!(dashboard.ring_color, ThreatColor::Caution);
    assert!((dashboard.ring_offset - (691.15 - 691.15 * 0.40)).abs() < 1e-9);
}

#[test]
fn test_invalid_names_are_rejected() {
    let mut sim = ScanSimulator::new(StdRng::seed_from_u64(3));

    for name in ["evil.exe", "app.APK", "app.apk.bak", ""] {
        let err = sim.submit(name).unwrap_err();
        assert!(matches!(err, SentinelError::InvalidSubmission { .. }));
        assert_eq!(sim.state(), ScanState::Idle);
    }
    assert_eq!(sim.notification(), Some("Please upload a valid APK file"));
    assert!(sim.submit("app.apk").is_ok());
    assert_eq!(sim.notification(), None);
}

#[test]
fn test_every_session_reports_all_categories_in_range() {
    let mut sim = ScanSimulator::new(StdRng::seed_from_u64(77));

    for round in 0..50 {
        sim.submit(&format!("build-{}.apk", round)).unwrap();
        sim.run_to_completion();

        let dashboard = &sim.session().unwrap().dashboard;
        let report = dashboard.report.unwrap();
        let categories: Vec<Category> = dashboard.bars.iter().map(|bar| bar.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        for (category, value) in report.iter() {
            assert!(category.range().contains(&value));
        }
        let score = dashboard.overall_score.unwrap();
        assert!((50..=99).contains(&score));
    }
}

#[test]
fn test_same_seed_same_report() {
    let mut a = ScanSimulator::new(StdRng::seed_from_u64(99));
    let mut b = ScanSimulator::new(StdRng::seed_from_u64(99));
    a.submit("a.apk").unwrap();
    b.submit("b.apk").unwrap();
    a.run_to_completion();
    b.run_to_completion();

    assert_eq!(
        a.session().unwrap().dashboard.report,
        b.session().unwrap().dashboard.report
    );
}
