//! End-to-end tests of the global search and suggestion surfaces

mod utils;

use pretty_assertions::assert_eq;

use line_network::id::{ObjectIdGenerator, ServerId};
use line_search::errors::{DirectoryError, SearchError};
use line_search::records::Searchable;
use line_search::{EntityKind, SearchRequest, SortBy};

use utils::{
    chat, engine, message, suggester, tag, user, wall, BrokenDirectory, InMemoryDirectory,
};

#[tokio::test]
async fn two_character_minimum_is_a_hard_boundary() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let search = engine(InMemoryDirectory {
        walls: vec![wall(&ids, "ab")],
        ..Default::default()
    });

    assert!(matches!(
        search.run(SearchRequest::new("a"), None).await,
        Err(SearchError::QueryTooShort)
    ));
    assert!(matches!(
        search.run(SearchRequest::new(" b "), None).await,
        Err(SearchError::QueryTooShort)
    ));

    let results = search.run(SearchRequest::new("ab"), None).await.unwrap();
    assert_eq!(results.total, 1);
}

#[tokio::test]
async fn visibility_filters_apply_before_scoring() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let viewer = ids.next_user();
    let outsider = ids.next_user();

    let public = wall(&ids, "rust hub");
    let mut private = wall(&ids, "rust private");
    private.is_public = false;
    let mut dormant = wall(&ids, "rust archive");
    dormant.is_active = false;

    let visible = message(&ids, public.id, "rust tips");
    let mut on_private_wall = message(&ids, private.id, "rust secrets");
    on_private_wall.wall_is_public = false;
    let mut erased = message(&ids, public.id, "rust retracted");
    erased.deleted = true;

    let mine = chat(&ids, "rust chat", vec![viewer]);
    let not_mine = chat(&ids, "rust planning", vec![outsider]);

    let search = engine(InMemoryDirectory {
        walls: vec![public, private, dormant],
        messages: vec![visible, on_private_wall, erased],
        chats: vec![mine, not_mine],
        ..Default::default()
    });

    let results = search
        .run(SearchRequest::new("rust"), Some(viewer))
        .await
        .unwrap();

    let walls: Vec<&str> = results.walls.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(walls, vec!["rust hub"]);
    let messages: Vec<&str> = results
        .messages
        .iter()
        .map(|h| h.record.content.as_str())
        .collect();
    assert_eq!(messages, vec!["rust tips"]);
    let chats: Vec<&str> = results.chats.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(chats, vec!["rust chat"]);
    assert_eq!(results.total, 3);

    // An anonymous run sees no chats at all
    let anonymous = search.run(SearchRequest::new("rust"), None).await.unwrap();
    assert!(anonymous.chats.is_empty());
    assert_eq!(anonymous.total, 2);
}

#[tokio::test]
async fn scoring_ranks_exact_prefix_contains_in_order() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let search = engine(InMemoryDirectory {
        tags: vec![
            tag(&ids, "awesome-react"),
            tag(&ids, "react"),
            tag(&ids, "react-router"),
        ],
        ..Default::default()
    });

    let results = search.run(SearchRequest::new("react"), None).await.unwrap();

    let ranked: Vec<(&str, f64)> = results
        .tags
        .iter()
        .map(|hit| (hit.record.name.as_str(), hit.relevance_score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("react", 100.0),
            ("react-router", 75.0),
            ("awesome-react", 50.0),
        ]
    );
}

#[tokio::test]
async fn word_fraction_scores_partial_matches() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let home = ids.next_wall();
    let search = engine(InMemoryDirectory {
        messages: vec![
            message(&ids, home, "car red"),
            message(&ids, home, "red door"),
            message(&ids, home, "blue door"),
        ],
        ..Default::default()
    });

    let results = search
        .run(SearchRequest::new("red car"), None)
        .await
        .unwrap();

    let ranked: Vec<(&str, f64)> = results
        .messages
        .iter()
        .map(|hit| (hit.record.content.as_str(), hit.relevance_score))
        .collect();
    assert_eq!(ranked, vec![("car red", 25.0), ("red door", 12.5)]);
    assert_eq!(results.total, 2);
}

#[tokio::test]
async fn popularity_breaks_relevance_ties() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut quiet = wall(&ids, "react");
    quiet.member_count = 5;
    let mut busy = wall(&ids, "react");
    busy.member_count = 50;

    let search = engine(InMemoryDirectory {
        walls: vec![quiet, busy],
        ..Default::default()
    });

    let results = search.run(SearchRequest::new("react"), None).await.unwrap();
    let ranked: Vec<u32> = results
        .walls
        .iter()
        .map(|hit| hit.record.member_count)
        .collect();
    assert_eq!(ranked, vec![50, 5]);
}

#[tokio::test]
async fn date_sort_orders_by_recency_and_skips_the_combined_list() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut old = tag(&ids, "rust 2015");
    old.created_at = 100;
    let mut mid = tag(&ids, "rust 2018");
    mid.created_at = 200;
    let mut new = tag(&ids, "rust 2021");
    new.created_at = 300;

    let search = engine(InMemoryDirectory {
        tags: vec![old, mid, new],
        ..Default::default()
    });

    let mut request = SearchRequest::new("rust");
    request.sort_by = SortBy::Date;
    let results = search.run(request, None).await.unwrap();

    let ranked: Vec<i64> = results
        .tags
        .iter()
        .map(|hit| hit.record.created_at)
        .collect();
    assert_eq!(ranked, vec![300, 200, 100]);
    assert!(results.combined.is_empty());
}

#[tokio::test]
async fn relevance_sort_builds_a_combined_cross_type_ranking() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));

    let search = engine(InMemoryDirectory {
        walls: vec![wall(&ids, "react")],
        // Name and username both match exactly, so the user outscores the
        // single-field wall match
        users: vec![user(&ids, "react")],
        tags: vec![tag(&ids, "react-router")],
        ..Default::default()
    });

    let results = search.run(SearchRequest::new("react"), None).await.unwrap();

    let ranked: Vec<(EntityKind, f64)> = results
        .combined
        .iter()
        .map(|hit| (hit.kind, hit.relevance_score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            (EntityKind::User, 200.0),
            (EntityKind::Wall, 100.0),
            (EntityKind::Tag, 75.0),
        ]
    );
    assert_eq!(results.combined[0].record.display_text(), "react");
    assert_eq!(results.total, 3);
}

#[tokio::test]
async fn pagination_slices_after_total_is_counted() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut fixtures = Vec::new();
    for (name, usage) in [
        ("rust", 0),
        ("rust-lang", 10),
        ("rustacean", 5),
        ("learn rust", 3),
        ("trust", 1),
    ] {
        let mut record = tag(&ids, name);
        record.usage_count = usage;
        fixtures.push(record);
    }

    let search = engine(InMemoryDirectory {
        tags: fixtures,
        ..Default::default()
    });

    let mut request = SearchRequest::new("rust");
    request.limit = Some(2);
    request.page = Some(2);
    let results = search.run(request, None).await.unwrap();

    let page: Vec<&str> = results
        .tags
        .iter()
        .map(|hit| hit.record.name.as_str())
        .collect();
    assert_eq!(page, vec!["rustacean", "learn rust"]);
    assert_eq!(results.total, 5);
}

#[tokio::test]
async fn entity_selection_limits_the_fan_out() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let home = ids.next_wall();
    let viewer = ids.next_user();

    let search = engine(InMemoryDirectory {
        walls: vec![wall(&ids, "react")],
        messages: vec![message(&ids, home, "react")],
        users: vec![user(&ids, "react")],
        tags: vec![tag(&ids, "react")],
        chats: vec![chat(&ids, "react", vec![viewer])],
    });

    let mut request = SearchRequest::new("react");
    request.include_entities = "walls,tags".parse().unwrap();
    let results = search.run(request, Some(viewer)).await.unwrap();

    assert_eq!(results.walls.len(), 1);
    assert_eq!(results.tags.len(), 1);
    assert!(results.messages.is_empty());
    assert!(results.users.is_empty());
    assert!(results.chats.is_empty());
    assert_eq!(results.total, 2);

    // Unfiltered, the same directory yields all five kinds
    let all = search
        .run(SearchRequest::new("react"), Some(viewer))
        .await
        .unwrap();
    assert_eq!(all.total, 5);
}

#[tokio::test]
async fn category_filters_walls_and_their_messages() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut tech = wall(&ids, "rust hub");
    tech.category = Some("tech".to_string());
    let mut art = wall(&ids, "rust sketches");
    art.category = Some("art".to_string());

    let mut tech_post = message(&ids, tech.id, "rust macros");
    tech_post.category = Some("tech".to_string());
    let mut art_post = message(&ids, art.id, "rust painting");
    art_post.category = Some("art".to_string());
    let uncategorised = message(&ids, tech.id, "rust misc");

    let search = engine(InMemoryDirectory {
        walls: vec![tech, art],
        messages: vec![tech_post, art_post, uncategorised],
        users: vec![user(&ids, "rust fan")],
        ..Default::default()
    });

    let mut request = SearchRequest::new("rust");
    request.category = Some("Tech".to_string());
    let results = search.run(request, None).await.unwrap();

    let walls: Vec<&str> = results.walls.iter().map(|h| h.record.name.as_str()).collect();
    assert_eq!(walls, vec!["rust hub"]);
    let messages: Vec<&str> = results
        .messages
        .iter()
        .map(|h| h.record.content.as_str())
        .collect();
    assert_eq!(messages, vec!["rust macros"]);
    // Users have no category; the filter does not apply to them
    assert_eq!(results.users.len(), 1);
    assert_eq!(results.total, 3);
}

#[tokio::test]
async fn date_range_bounds_are_applied() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut early = tag(&ids, "rust early");
    early.created_at = 50;
    let mut inside = tag(&ids, "rust inside");
    inside.created_at = 150;
    let mut late = tag(&ids, "rust late");
    late.created_at = 250;

    let search = engine(InMemoryDirectory {
        tags: vec![early, inside, late],
        ..Default::default()
    });

    let mut request = SearchRequest::new("rust");
    request.date_from = Some(100);
    request.date_to = Some(200);
    let results = search.run(request, None).await.unwrap();

    let names: Vec<&str> = results
        .tags
        .iter()
        .map(|hit| hit.record.name.as_str())
        .collect();
    assert_eq!(names, vec!["rust inside"]);
    assert_eq!(results.total, 1);
}

#[tokio::test]
async fn a_failing_directory_surfaces_as_a_search_error() {
    let search = engine(BrokenDirectory);
    let result = search.run(SearchRequest::new("rust"), None).await;
    assert!(matches!(
        result,
        Err(SearchError::Directory(DirectoryError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn results_serialize_with_wire_names() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let mut hub = wall(&ids, "react");
    hub.member_count = 7;
    let search = engine(InMemoryDirectory {
        walls: vec![hub],
        ..Default::default()
    });

    let results = search.run(SearchRequest::new("react"), None).await.unwrap();
    let value = serde_json::to_value(&results).unwrap();

    assert_eq!(value["total"], serde_json::json!(1));
    let hit = &value["walls"][0];
    assert_eq!(hit["type"], serde_json::json!("wall"));
    assert_eq!(hit["relevanceScore"], serde_json::json!(100.0));
    // Record fields are flattened into the hit
    assert_eq!(hit["name"], serde_json::json!("react"));
    assert_eq!(hit["member_count"], serde_json::json!(7));

    // The combined list serialises the same shape
    assert_eq!(value["combined"][0]["type"], serde_json::json!("wall"));
}

#[tokio::test]
async fn suggestions_dedupe_rank_and_truncate() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));

    let mut author = user(&ids, "react");
    author.avatar = Some("avatars/react.png".to_string());

    let mut popular = tag(&ids, "react");
    popular.usage_count = 50;
    let mut niche = tag(&ids, "react");
    niche.usage_count = 5;

    let mut hidden = wall(&ids, "react");
    hidden.is_public = false;

    let suggestions = suggester(InMemoryDirectory {
        walls: vec![hidden],
        users: vec![author],
        tags: vec![popular, niche],
        ..Default::default()
    });

    let list = suggestions.run("react", None).await.unwrap();

    // One user, one tag; the duplicate tag collapsed to its more popular
    // copy, and the private wall never appeared
    let summary: Vec<(EntityKind, &str, u32)> = list
        .iter()
        .map(|s| (s.kind, s.text.as_str(), s.popularity))
        .collect();
    assert_eq!(
        summary,
        vec![
            (EntityKind::User, "react", 0),
            (EntityKind::Tag, "react", 50),
        ]
    );
    assert_eq!(list[0].icon, Some("avatars/react.png".to_string()));

    let tag_entry = serde_json::to_value(&list[1]).unwrap();
    assert_eq!(tag_entry["type"], serde_json::json!("tag"));
    // Absent icons are omitted from the payload entirely
    assert!(tag_entry.get("icon").is_none());

    let one = suggestions.run("react", Some(1)).await.unwrap();
    assert_eq!(one.len(), 1);
}

#[tokio::test]
async fn suggestion_queries_below_the_minimum_stay_empty() {
    let ids = ObjectIdGenerator::new(ServerId::new(1));
    let suggestions = suggester(InMemoryDirectory {
        tags: vec![tag(&ids, "react")],
        ..Default::default()
    });

    assert!(suggestions.run("r", None).await.unwrap().is_empty());
    assert!(suggestions.run("  ", None).await.unwrap().is_empty());
}
