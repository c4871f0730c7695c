use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

use super::{BuildContext, ExtendedBuild, ExtendedParse, ParseContext};
use crate::QueryMapper;
use crate::derive::Queryable;
use crate::error::QueryError;
use crate::ops::DynamicStruct;
use crate::query::QueryConfig;
use crate::registry::SharedRegistry;
use crate::strategy::Strategy;

fn mapper() -> QueryMapper {
    QueryMapper::new().with_registry(SharedRegistry::default())
}

#[derive(Queryable, Default, Debug, PartialEq)]
#[query(default)]
struct Filter {
    #[query(rename = "Name")]
    name: String,
    #[query(rename = "Tags")]
    tags: Vec<String>,
    #[query(rename = "Limit")]
    limit: Option<u32>,
}

#[test]
fn round_trip_of_a_flat_struct() {
    let mapper = mapper();
    let filter = Filter {
        name: String::from("Alice"),
        tags: vec![String::from("a"), String::from("b"), String::from("c")],
        limit: None,
    };
    let query = mapper.build(&filter).unwrap();
    assert_eq!(query.query_string(), "Name=Alice&Tags=a+b+c");
    assert_eq!(query.get("Limit"), None);

    let parsed: Filter = mapper.parse(query.query_string()).unwrap();
    assert_eq!(parsed, filter);
}

#[test]
fn absent_parameters_leave_slots_untouched() {
    let mut filter = Filter {
        name: String::from("kept"),
        tags: vec![String::from("x")],
        limit: Some(3),
    };
    mapper().parse_into(&mut filter, "Other=1&Limit=9").unwrap();
    assert_eq!(filter.name, "kept");
    assert_eq!(filter.tags, ["x"]);
    assert_eq!(filter.limit, Some(9));
}

#[test]
fn repeated_parameters_are_joined() {
    let filter: Filter = mapper().parse("Tags=a&Name=n&Tags=b+c").unwrap();
    assert_eq!(filter.tags, ["a", "b", "c"]);
}

#[test]
fn conversion_failure_aborts_the_parse() {
    let err = mapper().parse::<Filter>("Limit=many").unwrap_err();
    assert!(matches!(err, QueryError::Conversion { type_path, .. } if type_path == "u32"));
}

// -----------------------------------------------------------------------------
// Groups and name collisions

#[derive(Queryable, Default, Debug, PartialEq)]
#[query(default)]
struct Inner {
    id: u32,
    label: String,
}

#[derive(Queryable, Default, Debug, PartialEq)]
#[query(default)]
struct Outer {
    id: u32,
    inner: Inner,
    #[query(instantiate)]
    extra: Option<Inner>,
}

#[test]
fn later_slots_win_name_collisions() {
    let outer = Outer {
        id: 1,
        inner: Inner {
            id: 2,
            label: String::from("x"),
        },
        extra: None,
    };
    let query = mapper().build(&outer).unwrap();
    // `id` keeps the position of its first occurrence
    assert_eq!(query.query_string(), "id=2&label=x");
}

#[test]
fn parse_binds_the_first_slot_of_a_name() {
    let outer: Outer = mapper().parse("id=5&label=y").unwrap();
    assert_eq!(outer.id, 5);
    assert_eq!(outer.inner.id, 0);
    assert_eq!(outer.inner.label, "y");
}

#[test]
fn flagged_null_groups_are_instantiated_on_parse() {
    let outer: Outer = mapper().parse("").unwrap();
    assert_eq!(outer.extra, Some(Inner::default()));
}

#[derive(Queryable, Default, Debug)]
struct NoDefault {
    value: u8,
}

#[derive(Queryable, Default, Debug)]
#[query(default)]
struct NeedsInstance {
    #[query(instantiate)]
    group: Option<NoDefault>,
}

#[test]
fn missing_default_fails_instantiation() {
    let err = mapper().parse::<NeedsInstance>("value=1").unwrap_err();
    assert!(matches!(err, QueryError::Instantiation { .. }));
}

// -----------------------------------------------------------------------------
// Slot policies

#[derive(Queryable, Default, Debug, PartialEq)]
#[query(default)]
struct Policies {
    #[query(strategy = Strategy::NullMarker)]
    all: Option<bool>,
    #[query(strategy = Strategy::BooleanAsBit)]
    strict: bool,
    #[query(skip_build)]
    hidden: u8,
    #[query(skip_parse)]
    fixed: u8,
    #[query(read_only)]
    locked: u8,
    #[query(write_only)]
    secret: u8,
    #[query(skip_parse, instantiate)]
    lazy_group: Option<Inner>,
}

#[test]
fn slot_policies_on_build() {
    let value = Policies {
        strict: true,
        hidden: 1,
        fixed: 2,
        locked: 3,
        secret: 4,
        ..Policies::default()
    };
    let query = mapper().build(&value).unwrap();
    assert_eq!(query.query_string(), "all=&strict=1&fixed=2&locked=3");
}

#[test]
fn slot_policies_on_parse() {
    let value: Policies = mapper()
        .parse("all&strict=1&hidden=1&fixed=2&locked=3&secret=4")
        .unwrap();
    assert_eq!(value.all, None);
    assert!(value.strict);
    assert_eq!((value.hidden, value.fixed, value.locked, value.secret), (1, 0, 0, 4));
    assert_eq!(value.lazy_group, Some(Inner::default()));
}

#[derive(Queryable, Default)]
#[query(default, explicit_only)]
struct Explicit {
    #[query]
    page: u32,
    #[query(rename = "q")]
    term: String,
    internal: u32,
}

#[test]
fn explicit_only_ignores_undeclared_slots() {
    let value = Explicit {
        page: 1,
        term: String::from("t"),
        internal: 7,
    };
    assert_eq!(mapper().build(&value).unwrap().query_string(), "page=1&q=t");

    let parsed: Explicit = mapper().parse("page=2&internal=9").unwrap();
    assert_eq!((parsed.page, parsed.internal), (2, 0));
}

// -----------------------------------------------------------------------------
// Depth

#[derive(Queryable, Default)]
#[query(default)]
struct Node {
    #[query(rename = "v")]
    value: u8,
    next: Option<Box<Node>>,
}

fn chain(len: u8) -> Node {
    let mut node = Node::default();
    for value in 1..len {
        node = Node {
            value,
            next: Some(Box::new(node)),
        };
    }
    node
}

#[test]
fn depth_is_limited() {
    let config = QueryConfig {
        max_depth: 4,
        ..QueryConfig::default()
    };
    let mapper = QueryMapper::with_config(&config)
        .unwrap()
        .with_registry(SharedRegistry::default());

    // the innermost node is walked last
    assert_eq!(mapper.build(&chain(4)).unwrap().query_string(), "v=0");

    let err = mapper.build(&chain(5)).unwrap_err();
    assert!(matches!(err, QueryError::DepthExceeded { limit: 4, .. }));
}

// -----------------------------------------------------------------------------
// Hooks

#[derive(Queryable, Default, Debug)]
#[query(default, extend_build, extend_parse)]
struct Hooked {
    #[query(rename = "p")]
    page: u32,
    #[query(skip)]
    paging: Option<Inner>,
    #[query(read_only)]
    locked: u8,
}

impl ExtendedBuild for Hooked {
    fn extend_build<'a>(&'a self, ctx: &mut BuildContext<'a>) -> Result<(), QueryError> {
        if self.page == 0 {
            ctx.remove("p");
        }
        ctx.add_value("v", 2_u8)
    }
}

impl ExtendedParse for Hooked {
    fn extend_parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), QueryError> {
        if ctx.dictionary().contains("label") {
            ctx.bind_path(self, "paging.label", "label")?;
        }
        if ctx.dictionary().contains("lock") {
            ctx.bind("locked", "lock")?;
        }
        if ctx.dictionary().contains("bogus") {
            ctx.bind("missing", "bogus")?;
        }
        Ok(())
    }
}

#[test]
fn build_hook_edits_parameters() {
    let mut value = Hooked {
        page: 3,
        ..Hooked::default()
    };
    assert_eq!(mapper().build(&value).unwrap().query_string(), "p=3&locked=0&v=2");
    value.page = 0;
    assert_eq!(mapper().build(&value).unwrap().query_string(), "locked=0&v=2");
}

#[test]
fn parse_hook_binds_paths() {
    let value: Hooked = mapper().parse("p=4&label=deep").unwrap();
    assert_eq!(value.page, 4);
    assert_eq!(value.paging.map(|inner| inner.label).as_deref(), Some("deep"));
}

#[test]
fn parse_hook_errors_surface() {
    let err = mapper().parse::<Hooked>("lock=1").unwrap_err();
    assert!(matches!(err, QueryError::NotWritable { slot: "locked", .. }));

    let err = mapper().parse::<Hooked>("bogus=1").unwrap_err();
    assert!(matches!(err, QueryError::NotFound { slot, .. } if slot == "missing"));
}

#[test]
fn bindings_are_unique_per_name() {
    #[derive(Queryable, Default)]
    #[query(default, extend_parse)]
    struct Twice {
        first: u8,
        second: u8,
    }

    impl ExtendedParse for Twice {
        fn extend_parse(&mut self, ctx: &mut ParseContext<'_>) -> Result<(), QueryError> {
            assert!(ctx.exists("first"));
            assert!(!ctx.bind("second", "first")?);
            assert!(!ctx.bind("second", "absent")?);
            assert_eq!(ctx.bindings().len(), 1);
            Ok(())
        }
    }

    let value: Twice = mapper().parse("first=1").unwrap();
    assert_eq!((value.first, value.second), (1, 0));
}

// -----------------------------------------------------------------------------
// Property bags

fn search_bag() -> DynamicStruct {
    let mut bag = DynamicStruct::new();
    bag.extend("term", String::from("rust"));
    bag.extend("page", 2_u32);
    bag.extend("tags", vec![String::from("a"), String::from("b")]);
    bag.extend("limit", None::<u32>);
    bag.extend(
        "paging",
        Inner {
            id: 7,
            label: String::from("x"),
        },
    );
    bag
}

#[test]
fn bags_build_like_structs() {
    let query = mapper().build(&search_bag()).unwrap();
    assert_eq!(query.query_string(), "term=rust&page=2&tags=a+b&id=7&label=x");
}

#[test]
fn bags_parse_into_existing_entries_only() {
    let mut bag = search_bag();
    mapper()
        .parse_into(&mut bag, "term=go&limit=5&id=9&unknown=1&tags=c")
        .unwrap();

    assert_eq!(bag.get("term").unwrap().downcast_ref::<String>().unwrap(), "go");
    assert_eq!(bag.get("page").unwrap().downcast_ref::<u32>(), Some(&2));
    assert_eq!(bag.get("limit").unwrap().downcast_ref::<Option<u32>>(), Some(&Some(5)));
    assert_eq!(bag.get("tags").unwrap().downcast_ref::<Vec<String>>().unwrap(), &["c"]);
    let paging = bag.get("paging").unwrap().downcast_ref::<Inner>().unwrap();
    assert_eq!((paging.id, paging.label.as_str()), (9, "x"));
    assert_eq!(bag.index_of("unknown"), None);
    assert_eq!(bag.field_len(), 5);

    // a fresh bag has nothing to bind
    let empty: DynamicStruct = mapper().parse("term=go").unwrap();
    assert!(empty.is_empty());
}

#[test]
fn bags_nest_inside_structs() {
    #[derive(Queryable, Default, Debug)]
    #[query(default)]
    struct Envelope {
        kind: u8,
        extras: DynamicStruct,
    }

    let mut envelope = Envelope {
        kind: 1,
        extras: DynamicStruct::new(),
    };
    envelope.extras.extend("color", String::from("red"));
    let query = mapper().build(&envelope).unwrap();
    assert_eq!(query.query_string(), "kind=1&color=red");

    mapper().parse_into(&mut envelope, "color=blue&kind=2").unwrap();
    assert_eq!(envelope.kind, 2);
    let color = envelope.extras.get("color").unwrap().downcast_ref::<String>().unwrap();
    assert_eq!(color, "blue");
}

#[test]
fn bag_entries_follow_the_registry() {
    let registry = SharedRegistry::default();
    registry.register::<u32>(Strategy::NullMarker);
    let mapper = QueryMapper::new().with_registry(registry);

    let mut bag = DynamicStruct::new();
    bag.extend("limit", None::<u32>);
    bag.extend("flag", true);
    assert_eq!(mapper.build(&bag).unwrap().query_string(), "limit=&flag=true");

    let err = mapper.parse_into(&mut bag, "flag=maybe").unwrap_err();
    assert!(matches!(err, QueryError::Conversion { .. }));
}
