use chrono::NaiveDate;
use daily_wisdom_core::{
    ArticleCatalog, FixedClock, NavigationPosition, NextBlockedReason, ReaderConfig, ReaderService,
};
use std::fs;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn config(developer_mode: bool) -> ReaderConfig {
    ReaderConfig {
        start_date: date(2024, 1, 1),
        developer_mode,
        articles_path: None,
    }
}

#[test]
fn builtin_reader_walks_back_from_latest() {
    let reader = ReaderService::from_config(&config(false), FixedClock(date(2024, 1, 4))).unwrap();
    let builtin = ArticleCatalog::builtin().unwrap();

    let view = reader.open().unwrap();
    assert_eq!(view.index(), 3);
    assert_eq!(&view.article, builtin.get(3).unwrap());
    assert!(!view.can_go_next);
    assert_eq!(view.next_blocked_reason, Some(NextBlockedReason::Schedule));

    let back = reader.previous(view.index()).unwrap();
    assert_eq!(back.index(), 2);
    assert_eq!(back.position, NavigationPosition::MidRange);

    let forward = reader.next(back.index()).unwrap();
    assert_eq!(forward.index(), 3);
    assert_eq!(reader.next(forward.index()).unwrap().index(), 3);
}

#[test]
fn before_start_shows_first_article_without_forward_moves() {
    let reader = ReaderService::from_config(&config(false), FixedClock(date(2023, 12, 20))).unwrap();
    let view = reader.open().unwrap();
    assert_eq!(view.index(), 0);
    assert_eq!(view.available_count, 0);
    assert!(!view.can_go_next);

    let status = reader.status();
    assert_eq!(status.next_unlock_date, Some(date(2024, 1, 1)));
}

#[test]
fn developer_mode_reaches_last_builtin_article() {
    let reader = ReaderService::from_config(&config(true), FixedClock(date(2024, 1, 1))).unwrap();
    let total = reader.catalog().len();
    let mut view = reader.open().unwrap();
    assert_eq!(view.index(), 0);
    while view.can_go_next {
        view = reader.next(view.index()).unwrap();
    }
    assert_eq!(view.index(), total - 1);
    assert_eq!(view.position, NavigationPosition::AtEndOfList);
    assert_eq!(view.next_blocked_reason, Some(NextBlockedReason::EndOfList));
}

#[test]
fn configured_path_overrides_builtin_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("articles.json");
    fs::write(
        &path,
        r#"{"inspiration":[{"title":"Only","author":"Me","content":"Hello <b>x</b>"}]}"#,
    )
    .unwrap();

    let mut cfg = config(false);
    cfg.articles_path = Some(path);
    let reader = ReaderService::from_config(&cfg, FixedClock(date(2024, 6, 3))).unwrap();
    let view = reader.open().unwrap();
    assert_eq!(view.article.title, "Only");
    assert_eq!(view.total_count, 1);
    assert!(view.html.contains("&lt;b&gt;"));
    assert_eq!(view.position, NavigationPosition::AtEndOfList);
}

#[test]
fn builtin_collection_blocks_on_schedule_until_monday() {
    let reader = ReaderService::from_config(&config(false), FixedClock(date(2024, 1, 5))).unwrap();
    assert_eq!(reader.catalog().len(), 97);
    assert_eq!(reader.catalog().get(9).unwrap().title, "Quantify");

    let view = reader.open().unwrap();
    assert_eq!(view.index(), 4);
    assert_eq!(view.next_blocked_reason, Some(NextBlockedReason::Schedule));
    assert_eq!(view.next_unlock_date, Some(date(2024, 1, 8)));
    assert!(view.blocked_message().unwrap().contains("Monday, 2024-01-08"));
    assert_eq!(reader.status().next_unlock_date, view.next_unlock_date);

    let last_day = ReaderService::from_config(&config(false), FixedClock(date(2024, 5, 14))).unwrap();
    assert_eq!(last_day.status().available_count, 97);
    assert_eq!(last_day.open().unwrap().position, NavigationPosition::AtEndOfList);
}
