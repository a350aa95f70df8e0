use super::*;

struct Node {
    name: String,
    weight: i64,
    child: Leaf,
}

struct Leaf {
    tag: String,
}

impl Record for Node {
    fn schema() -> &'static Schema {
        static SCHEMA: SchemaCell = SchemaCell::new();
        SCHEMA.get_or_init(|| {
            Schema::builder::<Node>("Node")
                .text("Name", |n: &Node| n.name.as_str())
                .field("Weight", |n: &Node| n.weight)
                .record("Child", |n: &Node| &n.child)
                .build()
                .expect("node schema")
        })
    }
}

impl Record for Leaf {
    fn schema() -> &'static Schema {
        static SCHEMA: SchemaCell = SchemaCell::new();
        SCHEMA.get_or_init(|| {
            Schema::builder::<Leaf>("Leaf")
                .text("Tag", |l: &Leaf| l.tag.as_str())
                .build()
                .expect("leaf schema")
        })
    }
}

fn path(src: &str) -> PropertyPath {
    PropertyPath::parse(src).unwrap()
}

fn node() -> Node {
    Node {
        name: "root".to_string(),
        weight: 42,
        child: Leaf { tag: "leaf".to_string() },
    }
}

#[test]
fn duplicate_fields_ignore_case() {
    let result = Schema::builder::<Leaf>("Leaf")
        .text("Tag", |l: &Leaf| l.tag.as_str())
        .text("TAG", |l: &Leaf| l.tag.as_str())
        .build();

    assert_eq!(
        Some(SchemaError::DuplicateField { schema: "Leaf", field: "TAG".to_string() }),
        result.err(),
    );
}

#[test]
fn single_field_lookup() {
    let schema = Node::schema();

    assert_eq!(Some(FieldKind::I64), schema.resolve_field("weight").map(|f| f.kind()));
    assert_eq!(Some("Weight"), schema.resolve_field("WEIGHT").map(|f| f.name()));
    assert!(schema.resolve_field("missing").is_none());
}

#[test]
fn nested_schema() {
    let child = Node::schema().resolve_field("child").unwrap();

    assert_eq!(FieldKind::Record, child.kind());
    assert_eq!(Some("Leaf"), child.nested().map(|s| s.name()));
}

#[test]
fn read_through_path() {
    let row = node();

    let tag = Node::schema().resolve(&path("Child.Tag")).unwrap();
    assert_eq!(Some(Value::Str("leaf".into())), tag.read(&row));

    let weight = Node::schema().resolve(&path("weight")).unwrap();
    assert_eq!(Some(Value::I64(42)), weight.read(&row));
}

#[test]
fn read_wrong_row_type() {
    let weight = Node::schema().resolve(&path("Weight")).unwrap();
    let leaf = Leaf { tag: "x".to_string() };

    assert_eq!(None, weight.read(&leaf));
}
