use chain_board::chat::{self, ChatFilter};
use chain_board::config::AppConfig;
use chain_board::session::SessionState;
use pretty_assertions::assert_eq;
use sales_data::{CleanedTable, SalesRecord, TableSchema};

fn fixture_session() -> SessionState {
    let records = vec![
        SalesRecord {
            year: 2024,
            week: 1,
            month: 1,
            product: "Beef".to_string(),
            total: 100.0,
            by_restaurant: [("Riverside Mall".to_string(), 60.0)].into(),
        },
        SalesRecord {
            year: 2024,
            week: 2,
            month: 1,
            product: "Beef".to_string(),
            total: 90.0,
            by_restaurant: [("Riverside Mall".to_string(), 40.0)].into(),
        },
        SalesRecord {
            year: 2023,
            week: 2,
            month: 1,
            product: "Chili".to_string(),
            total: 20.0,
            by_restaurant: [("Riverside Mall".to_string(), 20.0)].into(),
        },
    ];

    let cleaned = CleanedTable {
        records,
        schema: TableSchema {
            restaurants: vec!["Riverside Mall".to_string()],
            ignored: Vec::new(),
        },
        report: Default::default(),
    };
    SessionState::from_cleaned(cleaned, AppConfig::default()).unwrap()
}

#[test]
fn test_filters_scope_the_excerpt() {
    let session = fixture_session();

    let all = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Riverside Mall",
            year: None,
            product: None,
        },
    )
    .unwrap();
    assert_eq!(all.len(), 3);

    let scoped = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Riverside Mall",
            year: Some(2024),
            product: Some("Beef"),
        },
    )
    .unwrap();
    assert_eq!(scoped.len(), 2);

    let nothing = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Riverside Mall",
            year: Some(2022),
            product: None,
        },
    );
    assert!(nothing.is_err());

    let unknown = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Nowhere",
            year: None,
            product: None,
        },
    );
    assert!(unknown.is_err());
}

#[test]
fn test_csv_excerpt_has_the_restaurant_column() {
    let session = fixture_session();
    let records = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Riverside Mall",
            year: Some(2024),
            product: None,
        },
    )
    .unwrap();

    let excerpt = chat::csv_excerpt(&records, "Riverside Mall").unwrap();
    let mut lines = excerpt.lines();
    assert_eq!(
        lines.next().unwrap(),
        "Year,Week,Month,Product,Total,Riverside Mall"
    );
    assert_eq!(lines.next().unwrap(), "2024,1,1,Beef,100,60");
    assert_eq!(excerpt.lines().count(), 3);
}

#[test]
fn test_insights_summarize_the_slice() {
    let session = fixture_session();
    let records = chat::filtered_records(
        &session,
        &ChatFilter {
            restaurant: "Riverside Mall",
            year: None,
            product: None,
        },
    )
    .unwrap();

    let insights = chat::insights(&records, "Riverside Mall").unwrap();
    assert_eq!(insights.top_product, "Beef");
    assert_eq!(insights.restaurant_total, 120.0);
    assert_eq!(insights.mean_weekly_orders, 40.0);
}
