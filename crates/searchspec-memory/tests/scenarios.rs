//! End-to-end tests of the in-memory backend.

use searchspec::{
    Condition, Op, SearchError, SortDirective, SpecBuilder, Timestamp, Translator,
};
use searchspec_memory::{
    Attribute, Kind, MemoryOptions, MemoryStore, NullsOrder, Searchable, Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
enum Status {
    #[default]
    Active,
    Retired,
}

impl Attribute for Status {
    const KIND: Kind = Kind::Enum;

    fn value(&self) -> Value<'_> {
        Value::Enum(match self {
            Status::Active => 0,
            Status::Retired => 1,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Searchable)]
struct Skill {
    name: String,
    #[search(rename = "years")]
    experience: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Searchable)]
struct Person {
    name: String,
    age: u32,
    born: Timestamp,
    status: Status,
    nickname: Option<String>,
    #[search(nested)]
    skill: Skill,
    #[search(skip)]
    notes: Vec<String>,
}

fn person(name: &str, age: u32, skill: &str) -> Person {
    Person {
        name: name.into(),
        age,
        born: Timestamp::from_secs(i64::from(2000 - age) * 31_536_000),
        status: Status::Active,
        nickname: None,
        skill: Skill {
            name: skill.into(),
            experience: None,
        },
        notes: vec!["private".into()],
    }
}

/// Four people with ages 30, 45, 60 and 75, in that storage order.
fn four_people() -> MemoryStore<Person> {
    MemoryStore::from_items([
        person("Nelson Mandela", 30, "Politician"),
        person("Albert Einstein", 45, "Scientist"),
        person("Marie Curie", 60, "Scientist"),
        person("Ada Lovelace", 75, "Mathematician"),
    ])
    .unwrap()
}

fn ages(items: &[Person]) -> Vec<u32> {
    items.iter().map(|p| p.age).collect()
}

fn names(items: &[Person]) -> Vec<&str> {
    items.iter().map(|p| p.name.as_str()).collect()
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn scenario_a_first_page_sorted_descending() {
    let store = four_people();
    let spec = SpecBuilder::select_page(1, 2)
        .unwrap()
        .sort_by(SortDirective::desc("age").unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    assert_eq!(ages(found.items()), [75, 60]);
    assert_eq!(found.total_matched(), 4);
    assert_eq!(found.pages_found(), 2);
    assert_eq!(found.current_page(), 1);
    assert_eq!(found.page_size(), 2);
}

#[test]
fn scenario_b_filter_ge() {
    let store = four_people();
    let spec = SpecBuilder::select_all()
        .filter(Condition::ge("age", 50).unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    assert_eq!(ages(found.items()), [60, 75]);
    assert_eq!(found.total_matched(), 2);
    assert_eq!(found.page_size(), 0);
    assert_eq!(found.current_page(), 0);
    assert_eq!(found.pages_found(), 1);
}

#[test]
fn scenario_c_filter_in() {
    let store = four_people();
    let spec = SpecBuilder::select_all()
        .filter(Condition::is_in("age", [30, 75]).unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    let mut got = ages(found.items());
    got.sort_unstable();
    assert_eq!(got, [30, 75]);
    assert_eq!(found.total_matched(), 2);
}

#[test]
fn page_past_the_end_is_empty_but_counted() {
    let store = four_people();
    let spec = SpecBuilder::select_page(5, 2).unwrap().build();

    let found = store.execute(&spec).unwrap();
    assert!(found.is_empty());
    assert_eq!(found.total_matched(), 4);
    assert_eq!(found.current_page(), 5);
    assert_eq!(found.pages_found(), 2);
}

#[test]
fn range_skips_offset() {
    let store = four_people();
    let spec = SpecBuilder::select_range(1, 2)
        .unwrap()
        .sort_by(SortDirective::asc("age").unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    assert_eq!(ages(found.items()), [45, 60]);
    assert_eq!(found.current_page(), 1);
}

// ============================================================================
// Condition semantics
// ============================================================================

#[test]
fn like_anchoring() {
    let store = MemoryStore::from_items([
        person("an", 1, "x"),
        person("Nelson Mandela", 2, "x"),
        person("banana", 3, "x"),
        person("Albert", 4, "x"),
    ])
    .unwrap();

    let run = |cond: Condition| {
        let spec = SpecBuilder::select_all().filter(cond).build();
        ages(store.execute(&spec).unwrap().items())
    };

    assert_eq!(run(Condition::like("name", "an", false, false).unwrap()), [1, 2, 3]);
    assert_eq!(run(Condition::like("name", "an", true, true).unwrap()), [1]);
    assert_eq!(run(Condition::starts_with("name", "an").unwrap()), [1]);
    assert_eq!(run(Condition::ends_with("name", "an").unwrap()), [1]);
    assert_eq!(run(Condition::ends_with("name", "na").unwrap()), [3]);
    // Case sensitive
    assert_eq!(run(Condition::starts_with("name", "al").unwrap()), Vec::<u32>::new());
}

#[test]
fn negation_is_the_complement() {
    let store = four_people();
    let matching = |cond: Condition| {
        let spec = SpecBuilder::select_all().filter(cond).build();
        ages(store.execute(&spec).unwrap().items())
    };

    let eq = Condition::eq("skill.name", "Scientist").unwrap();
    assert_eq!(matching(eq.clone()), [45, 60]);
    assert_eq!(matching(eq.clone().negated()), [30, 75]);
    assert_eq!(matching(eq.negated().negated()), [45, 60]);
}

#[test]
fn nested_boolean_trees() {
    let store = four_people();
    let tree = Condition::any([
        Condition::all([
            Condition::gt("age", 40).unwrap(),
            Condition::contains("name", "ie").unwrap(),
        ])
        .unwrap(),
        Condition::eq("skill.name", "Politician").unwrap(),
    ])
    .unwrap();

    let spec = SpecBuilder::select_all().filter(tree).build();
    let found = store.execute(&spec).unwrap();
    assert_eq!(names(found.items()), ["Nelson Mandela", "Marie Curie"]);
}

#[test]
fn nulls_match_only_is_null() {
    let mut store = four_people();
    store
        .update_where(&Condition::ge("age", 60).unwrap(), |p| {
            p.nickname = Some("Legend".into())
        })
        .unwrap();

    let null = Condition::is_null("nickname").unwrap();
    assert_eq!(store.count(&null).unwrap(), 2);
    assert_eq!(store.count(&null.clone().negated()).unwrap(), 2);

    let named = Condition::eq("nickname", "Legend").unwrap();
    assert_eq!(store.count(&named).unwrap(), 2);
    // Nulls fail the test, so they pass its negation
    assert_eq!(store.count(&named.negated()).unwrap(), 2);
}

#[test]
fn enums_timestamps_and_nested_options() {
    let mut store = four_people();
    store
        .update_where(&Condition::eq("name", "Ada Lovelace").unwrap(), |p| {
            p.status = Status::Retired;
            p.skill.experience = Some(20);
        })
        .unwrap();

    assert_eq!(
        store
            .count(&Condition::eq("status", searchspec::Operand::Enum(1)).unwrap())
            .unwrap(),
        1
    );
    assert_eq!(store.count(&Condition::gt("skill.years", 10u32).unwrap()).unwrap(), 1);
    assert_eq!(store.count(&Condition::is_null("skill.years").unwrap()).unwrap(), 3);

    let before_1950 = Condition::lt("born", Timestamp::from_secs(1950 * 31_536_000)).unwrap();
    assert_eq!(store.count(&before_1950).unwrap(), 2);
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn multi_key_sort_is_stable() {
    let store = four_people();
    let spec = SpecBuilder::select_all()
        .sort_by(SortDirective::asc("skill.name").unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    // The two scientists tie and keep storage order
    assert_eq!(
        names(found.items()),
        ["Ada Lovelace", "Nelson Mandela", "Albert Einstein", "Marie Curie"]
    );

    let spec = SpecBuilder::select_all()
        .sort_by(SortDirective::asc("skill.name").unwrap())
        .sort_by(SortDirective::desc("age").unwrap())
        .build();
    let found = store.execute(&spec).unwrap();
    assert_eq!(
        names(found.items()),
        ["Ada Lovelace", "Nelson Mandela", "Marie Curie", "Albert Einstein"]
    );
}

#[test]
fn duplicate_sort_key_uses_first_occurrence() {
    let store = four_people();
    let spec = SpecBuilder::select_all()
        .sort_by(SortDirective::desc("age").unwrap())
        .sort_by(SortDirective::asc("age").unwrap())
        .build();
    assert_eq!(ages(store.execute(&spec).unwrap().items()), [75, 60, 45, 30]);
}

#[test]
fn null_placement_follows_options() {
    let mut items = vec![
        person("a", 1, "x"),
        person("b", 2, "x"),
        person("c", 3, "x"),
    ];
    items[0].nickname = Some("Zed".into());
    items[2].nickname = Some("Amy".into());

    let spec = SpecBuilder::select_all()
        .sort_by(SortDirective::desc("nickname").unwrap())
        .build();

    let last = MemoryStore::from_items(items.clone()).unwrap();
    assert_eq!(ages(last.execute(&spec).unwrap().items()), [1, 3, 2]);

    let mut first =
        MemoryStore::with_options(MemoryOptions::new().nulls(NullsOrder::First)).unwrap();
    first.extend(items);
    assert_eq!(ages(first.execute(&spec).unwrap().items()), [2, 1, 3]);
}

#[derive(Debug, Clone, Default, PartialEq, Searchable)]
struct Reading {
    id: usize,
    level: f64,
}

fn readings(levels: &[f64]) -> MemoryStore<Reading> {
    MemoryStore::from_items(
        levels
            .iter()
            .enumerate()
            .map(|(id, &level)| Reading { id, level }),
    )
    .unwrap()
}

#[test]
fn nan_sorts_with_nulls() {
    let mut levels = Vec::new();
    for i in 0..64 {
        levels.push(if i % 4 == 0 { f64::NAN } else { (i * 37 % 64) as f64 });
    }
    levels.push(f64::INFINITY);
    levels.push(f64::NEG_INFINITY);

    for direction in [SortDirective::asc("level"), SortDirective::desc("level")] {
        let spec = SpecBuilder::select_all().sort_by(direction.unwrap()).build();
        let found = readings(&levels).execute(&spec).unwrap();
        let items = found.items();

        assert_eq!(found.total_matched(), levels.len());
        let (ordered, nans) = items.split_at(items.len() - 16);
        assert!(nans.iter().all(|r| r.level.is_nan()));
        assert!(ordered.iter().all(|r| !r.level.is_nan()));
        // NaN rows keep storage order
        assert!(nans.windows(2).all(|w| w[0].id < w[1].id));

        let values: Vec<f64> = ordered.iter().map(|r| r.level).collect();
        if spec.order().unwrap().directives()[0].is_descending() {
            assert!(values.windows(2).all(|w| w[0] >= w[1]));
            assert_eq!(values[0], f64::INFINITY);
        } else {
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
            assert_eq!(values[0], f64::NEG_INFINITY);
        }
    }

    let mut first =
        MemoryStore::with_options(MemoryOptions::new().nulls(NullsOrder::First)).unwrap();
    first.extend(readings(&[1.0, f64::NAN, 0.5]).items().iter().cloned());
    let spec = SpecBuilder::select_all()
        .sort_by(SortDirective::asc("level").unwrap())
        .build();
    let ids: Vec<usize> = first.execute(&spec).unwrap().items().iter().map(|r| r.id).collect();
    assert_eq!(ids, [1, 2, 0]);
}

#[test]
fn nan_never_matches_comparisons() {
    let store = readings(&[f64::NAN, 1.0, 3.0]);
    let spec = SpecBuilder::select_all()
        .filter(Condition::ge("level", 0.0).unwrap())
        .build();
    assert_eq!(store.execute(&spec).unwrap().total_matched(), 2);
}

// ============================================================================
// Projection
// ============================================================================

#[test]
fn projection_narrows_but_keeps_count() {
    let store = four_people();
    let spec = SpecBuilder::select_attributes([Person::NAME, Person::AGE])
        .unwrap()
        .filter(Condition::ge("age", 40).unwrap())
        .build();

    let found = store.execute(&spec).unwrap();
    assert_eq!(found.total_matched(), 3);
    for item in found.items() {
        assert!(!item.name.is_empty());
        assert_eq!(item.skill, Skill::default());
        assert_eq!(item.born, Timestamp::default());
        assert!(item.notes.is_empty());
    }
}

#[test]
fn projection_of_nested_paths() {
    let store = four_people();

    let spec = SpecBuilder::select_first_attributes(1, ["skill.name"])
        .unwrap()
        .build();
    let found = store.execute(&spec).unwrap();
    assert_eq!(found.items()[0].skill.name, "Politician");
    assert_eq!(found.items()[0].name, "");
    assert_eq!(found.total_matched(), 4);

    let spec = SpecBuilder::select_first_attributes(1, [Person::SKILL])
        .unwrap()
        .build();
    let found = store.execute(&spec).unwrap();
    assert_eq!(found.items()[0].skill, store.items()[0].skill);
}

// ============================================================================
// Translation errors
// ============================================================================

#[test]
fn unresolvable_paths_fail_translation() {
    let store = four_people();

    let cases = [
        SpecBuilder::select_all()
            .filter(Condition::eq("height", 1).unwrap())
            .build(),
        SpecBuilder::select_all()
            .sort_by(SortDirective::asc("skill.level").unwrap())
            .build(),
        SpecBuilder::select_attributes(["notes"]).unwrap().build(),
    ];
    for spec in cases {
        match store.translate(&spec) {
            Err(SearchError::Translation { op: None, .. }) => {}
            other => panic!("expected translation error, got {other:?}"),
        }
    }
}

#[test]
fn mismatched_operands_fail_translation() {
    let store = four_people();
    let spec = SpecBuilder::select_all()
        .filter(Condition::ge("name", 3).unwrap())
        .build();
    match store.execute(&spec) {
        Err(SearchError::Translation { path, op, .. }) => {
            assert_eq!(path, "name");
            assert_eq!(op, Some(Op::Ge));
        }
        other => panic!("expected translation error, got {other:?}"),
    }

    let err = store.count(&Condition::contains("age", "3").unwrap()).unwrap_err();
    assert!(matches!(err, SearchError::Translation { op: Some(Op::Like), .. }));
}

// ============================================================================
// Idempotence and reuse
// ============================================================================

#[test]
fn build_twice_executes_identically() {
    let store = four_people();
    let builder = SpecBuilder::select_page(2, 1)
        .unwrap()
        .filter(Condition::lt("age", 70).unwrap())
        .sort_by(SortDirective::asc("name").unwrap());

    let first = builder.build();
    let second = builder.build();
    assert_eq!(first, second);
    assert_eq!(store.execute(&first).unwrap(), store.execute(&second).unwrap());
}

#[test]
fn translated_query_runs_repeatedly() {
    let mut store = four_people();
    let spec = SpecBuilder::select_all()
        .filter(Condition::ge("age", 50).unwrap())
        .build();

    let query = store.translate(&spec).unwrap();
    assert_eq!(store.run(&query).unwrap().total_matched(), 2);

    store.insert(person("Grace Hopper", 85, "Scientist"));
    let query = store.translate(&spec).unwrap();
    assert_eq!(store.run(&query).unwrap().total_matched(), 3);
}

// ============================================================================
// Repository operations
// ============================================================================

#[test]
fn crud_round_trip() {
    let mut store = four_people();
    assert_eq!(store.len(), 4);

    let found = store
        .find_first(&Condition::eq("skill.name", "Scientist").unwrap())
        .unwrap()
        .map(|p| p.name.clone());
    assert_eq!(found.as_deref(), Some("Albert Einstein"));

    let updated = store
        .update_where(&Condition::eq("skill.name", "Scientist").unwrap(), |p| {
            p.age += 1
        })
        .unwrap();
    assert_eq!(updated, 2);
    assert_eq!(ages(store.items()), [30, 46, 61, 75]);

    let deleted = store.delete_where(&Condition::lt("age", 50).unwrap()).unwrap();
    assert_eq!(deleted, 2);
    assert_eq!(ages(store.items()), [61, 75]);

    assert!(store
        .find_first(&Condition::eq("name", "Nobody").unwrap())
        .unwrap()
        .is_none());
    assert!(store.delete_where(&Condition::eq("ghost", 1).unwrap()).is_err());
    assert_eq!(store.len(), 2);
}

#[test]
fn derive_generates_constants_and_shape() {
    assert_eq!(Person::NAME, "name");
    assert_eq!(Person::SKILL, "skill");
    assert_eq!(Skill::YEARS, "years");

    let shape = Person::shape().unwrap();
    assert_eq!(shape.name(), "Person");
    assert!(shape.contains("skill.years"));
    assert!(shape.contains("status"));
    assert!(!shape.contains("notes"));
    assert!(!shape.contains("skill"));
}
