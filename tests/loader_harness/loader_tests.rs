//! Macro-generated test suite for `Loader<TestItem>` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod loader_harness;
//!
//! use loader_harness::*;
//!
//! loader_tests!(|items: Vec<TestItem>| InMemoryLoader::with_items(items).unwrap().shared());
//! ```
//!
//! # Generated Tests
//!
//! ## Load
//! - `test_load_existing`
//! - `test_load_nonexistent`
//!
//! ## Paging
//! - `test_page_everything`
//! - `test_page_skip_and_limit`
//! - `test_page_skip_past_end`
//! - `test_page_zero_limit`
//!
//! ## Filters
//! - `test_extended_filter_on_foreign_key`
//! - `test_where_and_extended_filter_combine`
//! - `test_where_on_every_value_kind`
//! - `test_where_operators`
//! - `test_where_unknown_attribute`
//! - `test_null_condition_is_ignored`
//!
//! ## Edge Cases
//! - `test_concurrent_pages`

/// Generate a `Loader<TestItem>` conformance test suite.
///
/// `$factory` must evaluate to something callable with a `Vec<TestItem>` that
/// returns an `Arc<dyn Loader<TestItem>>` seeded with those items. It is
/// re-evaluated for each test to ensure isolation.
#[macro_export]
macro_rules! loader_tests {
    ($factory:expr) => {
        mod loader_contract_tests {
            use super::*;
            use gql_ug::core::Loader;
            use serde_json::json;
            use std::sync::Arc;
            use uuid::Uuid;

            fn seeded() -> (Arc<dyn Loader<TestItem>>, Vec<TestItem>, Uuid, Uuid) {
                let group_a = Uuid::new_v4();
                let group_b = Uuid::new_v4();
                let items = create_test_items(group_a, group_b);
                let loader = ($factory)(items.clone());
                (loader, items, group_a, group_b)
            }

            fn filter(value: serde_json::Value) -> Option<gql_ug::core::Filter> {
                value.as_object().cloned()
            }

            // ==================================================================
            // Load
            // ==================================================================

            #[tokio::test]
            async fn test_load_existing() {
                let (loader, items, _, _) = seeded();

                let loaded = loader.load(items[2].id).await.unwrap();
                assert_eq!(loaded, Some(items[2].clone()));
            }

            #[tokio::test]
            async fn test_load_nonexistent() {
                let (loader, _, _, _) = seeded();

                assert_eq!(loader.load(Uuid::new_v4()).await.unwrap(), None);
            }

            // ==================================================================
            // Paging
            // ==================================================================

            #[tokio::test]
            async fn test_page_everything() {
                let (loader, _, _, _) = seeded();

                let page = loader.page(0, 10, None, None).await.unwrap();
                assert_eq!(
                    names(&page),
                    vec!["Algebra", "Biology", "Chemistry", "Drama", "Economics"]
                );
            }

            #[tokio::test]
            async fn test_page_skip_and_limit() {
                let (loader, _, _, _) = seeded();

                let page = loader.page(1, 2, None, None).await.unwrap();
                assert_eq!(names(&page), vec!["Biology", "Chemistry"]);
            }

            #[tokio::test]
            async fn test_page_skip_past_end() {
                let (loader, _, _, _) = seeded();

                assert!(loader.page(10, 10, None, None).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_page_zero_limit() {
                let (loader, _, _, _) = seeded();

                assert!(loader.page(0, 0, None, None).await.unwrap().is_empty());
            }

            // ==================================================================
            // Filters
            // ==================================================================

            #[tokio::test]
            async fn test_extended_filter_on_foreign_key() {
                let (loader, _, _, group_b) = seeded();

                let page = loader
                    .page(0, 10, None, filter(json!({"group_id": group_b.to_string()})))
                    .await
                    .unwrap();
                assert_eq!(names(&page), vec!["Drama", "Economics"]);
            }

            #[tokio::test]
            async fn test_where_and_extended_filter_combine() {
                let (loader, _, group_a, _) = seeded();

                let page = loader
                    .page(
                        0,
                        10,
                        filter(json!({"grade>": 1})),
                        filter(json!({"group_id": group_a.to_string()})),
                    )
                    .await
                    .unwrap();
                assert_eq!(names(&page), vec!["Biology", "Chemistry"]);
            }

            #[tokio::test]
            async fn test_where_on_every_value_kind() {
                let (loader, items, _, _) = seeded();

                let cases = vec![
                    (json!({"name": "Drama"}), vec!["Drama"]),
                    (json!({"grade": 3}), vec!["Chemistry"]),
                    (json!({"score": 2.5}), vec!["Economics"]),
                    (json!({"active": true}), vec!["Biology", "Drama"]),
                    (json!({"id": items[0].id.to_string()}), vec!["Algebra"]),
                    (
                        json!({"lastchange": items[1].lastchange.to_rfc3339()}),
                        vec!["Biology"],
                    ),
                    (json!({"note": "evening"}), vec!["Economics"]),
                ];

                for (condition, expected) in cases {
                    let page = loader
                        .page(0, 10, filter(condition.clone()), None)
                        .await
                        .unwrap();
                    assert_eq!(names(&page), expected, "filter {}", condition);
                }
            }

            #[tokio::test]
            async fn test_where_operators() {
                let (loader, _, _, _) = seeded();

                let cases = vec![
                    (json!({"grade": {"_ge": 4}}), vec!["Drama", "Economics"]),
                    (json!({"grade<=": 1}), vec!["Algebra"]),
                    (json!({"grade!=": 2, "active": true}), vec!["Drama"]),
                    (json!({"name": {"_in": ["Algebra", "Drama"]}}), vec!["Algebra", "Drama"]),
                    (json!({"name": {"_ilike": "%IST%"}}), vec!["Chemistry"]),
                    (
                        json!({"_or": [{"grade": 1}, {"name": {"_like": "E%"}}]}),
                        vec!["Algebra", "Economics"],
                    ),
                    (
                        json!({"_and": [{"grade>": 1}, {"grade<": 4}]}),
                        vec!["Biology", "Chemistry"],
                    ),
                ];

                for (condition, expected) in cases {
                    let page = loader
                        .page(0, 10, filter(condition.clone()), None)
                        .await
                        .unwrap();
                    assert_eq!(names(&page), expected, "filter {}", condition);
                }
            }

            #[tokio::test]
            async fn test_where_unknown_attribute() {
                let (loader, _, _, _) = seeded();

                let page = loader
                    .page(0, 10, filter(json!({"colour": "red"})), None)
                    .await
                    .unwrap();
                assert!(page.is_empty());
            }

            #[tokio::test]
            async fn test_null_condition_is_ignored() {
                let (loader, _, _, _) = seeded();

                let page = loader
                    .page(0, 10, filter(json!({"name": null, "grade": {"_lt": 3}})), None)
                    .await
                    .unwrap();
                assert_eq!(names(&page), vec!["Algebra", "Biology"]);
            }

            // ==================================================================
            // Edge Cases
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_pages() {
                let (loader, _, group_a, _) = seeded();

                let mut handles = Vec::new();
                for skip in 0..3 {
                    let loader = loader.clone();
                    let group_a = group_a.to_string();
                    handles.push(tokio::spawn(async move {
                        loader
                            .page(skip, 1, None, filter(json!({"group_id": group_a})))
                            .await
                            .unwrap()
                    }));
                }

                let mut seen = Vec::new();
                for handle in handles {
                    seen.extend(handle.await.unwrap());
                }
                seen.sort_by_key(|i| i.grade);
                assert_eq!(names(&seen), vec!["Algebra", "Biology", "Chemistry"]);
            }
        }
    };
}
