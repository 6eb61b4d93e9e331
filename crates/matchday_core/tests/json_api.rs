use matchday_core::{simulate_match_json, MatchResponse, SimError};

#[test]
fn json_api_is_deterministic() {
    let request = r#"{"seed": 12345, "press": 6.5, "tempo": 4.0, "formation": "3-4-3"}"#;
    let a = simulate_match_json(request).unwrap();
    let b = simulate_match_json(request).unwrap();
    assert_eq!(a, b);

    let response: MatchResponse = serde_json::from_str(&a).unwrap();
    assert_eq!(response.formation, "3-4-3");
    assert!(!response.events.is_empty());
    let last = response.events.last().unwrap();
    assert_eq!(last.score_home, response.score_home);
    assert_eq!(last.score_away, response.score_away);
    assert_eq!(response.shots, (last.event.totals.home.shots, last.event.totals.away.shots));
}

#[test]
fn custom_rosters_are_used() {
    let home: Vec<String> = (1..=11)
        .map(|i| format!(r#"{{"name": "Home {i}", "rating": 70, "personality": "NERVOUS"}}"#))
        .collect();
    let request = format!(r#"{{"seed": 3, "home_roster": [{}]}}"#, home.join(","));
    let response: MatchResponse = serde_json::from_str(&simulate_match_json(&request).unwrap()).unwrap();
    assert_eq!(response.players.home[0].name, "Home 1");
    assert_eq!(response.players.home[10].name, "Home 11");
    assert_eq!(response.players.home[0].role, "GK");
    // away side keeps the demo roster
    assert_eq!(response.players.away.len(), 11);
    assert_ne!(response.players.away[0].name, "Home 1");
}

#[test]
fn unknown_formation_falls_back_to_default() {
    let json = simulate_match_json(r#"{"seed": 8, "formation": "1-1-8"}"#).unwrap();
    let response: MatchResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(response.formation, "4-4-2");
}

#[test]
fn bad_rating_is_rejected() {
    let rows: Vec<String> = (0..11)
        .map(|i| {
            let rating = if i == 4 { 120 } else { 75 };
            format!(r#"{{"name": "P{i}", "rating": {rating}}}"#)
        })
        .collect();
    let request = format!(r#"{{"seed": 1, "away_roster": [{}]}}"#, rows.join(","));
    let err = simulate_match_json(&request).unwrap_err();
    assert!(matches!(err, SimError::InvalidRoster(_)));
}

#[test]
fn config_overrides_are_applied() {
    let request = r#"{"seed": 5, "config": {"commentary": {"fatigue_window_start": 0, "fatigue_window_end": 90, "fatigue_threshold": 0.0, "home_dominance": 0.78, "away_dominance": 0.22}}}"#;
    let response: MatchResponse = serde_json::from_str(&simulate_match_json(request).unwrap()).unwrap();
    // every event sees a "tired" home player when the threshold is zero
    assert!(response.events.iter().all(|e| e.fatigue_warning.is_some()));
}

#[test]
fn partial_config_section_is_accepted() {
    let request = r#"{"seed": 5, "config": {"commentary": {"fatigue_threshold": 0.0}}}"#;
    let response: MatchResponse = serde_json::from_str(&simulate_match_json(request).unwrap()).unwrap();
    // the default 58-62 window still applies
    let warned: Vec<u8> = response
        .events
        .iter()
        .filter(|e| e.fatigue_warning.is_some())
        .map(|e| e.event.minute)
        .collect();
    assert!(warned.iter().all(|m| (58..=62).contains(m)));
}
