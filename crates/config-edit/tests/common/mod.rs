#![allow(dead_code)]

use std::sync::Arc;

use config_edit::schema::{EnumDef, InterfaceDef, Kind, RecordDef, TagRegistry};
use config_edit::value::{MapKey, Record, Value};
use config_edit::{EditOutcome, EditSpec, MemorySink, Session, Settings};
use indexmap::{IndexMap, IndexSet};

pub const TYPE_NAME: &str = "Unit";
pub const FILE_KEY: &str = "mech_light";
pub const MOD_ID: &str = "test_mod";

pub struct Fixture {
    pub unit: Arc<RecordDef>,
    pub stats: Arc<RecordDef>,
    pub weapon: Arc<RecordDef>,
    pub armor: Arc<RecordDef>,
    pub slot: Arc<RecordDef>,
    pub tags: Arc<TagRegistry>,
}

/// A mech config schema exercising every kind.
pub fn schema() -> Fixture {
    let part = InterfaceDef::new("IPart");
    let effect = InterfaceDef::new("IEffect");
    let rarity = EnumDef::new("Rarity", ["Common", "Rare", "Epic"]);

    let stats = RecordDef::builder("Stats")
        .field("hp", Kind::Int)
        .field("armor", Kind::Float)
        .field_with("speed", Kind::Float, 1.0f32)
        .build();
    let damage = RecordDef::builder("EffectDamage")
        .implements(&effect)
        .field("amount", Kind::Float)
        .build();
    let heal = RecordDef::builder("EffectHeal")
        .implements(&effect)
        .field("amount", Kind::Float)
        .field("radius", Kind::Float)
        .build();
    let part_base = RecordDef::builder("PartBase")
        .implements(&part)
        .field("name", Kind::String)
        .field("mass", Kind::Float)
        .build();
    let weapon = RecordDef::builder("WeaponPart")
        .extends(&part_base)
        .field("damage", Kind::Float)
        .field("effects", Kind::list(Kind::interface(&effect)))
        .build();
    let armor = RecordDef::builder("ArmorPart")
        .extends(&part_base)
        .field("rating", Kind::Int)
        .build();
    let slot = RecordDef::builder("Slot")
        .field("part", Kind::interface(&part))
        .field("size", Kind::Int)
        .build();
    let unit = RecordDef::builder("Unit")
        .field("name", Kind::String)
        .field("level", Kind::Int)
        .field("mass", Kind::Float)
        .field("active", Kind::Bool)
        .field("anchor", Kind::Vector2)
        .field("offset", Kind::Vector3)
        .field("bounds", Kind::Vector4)
        .field("tint", Kind::Color)
        .field("rarity", Kind::enumeration(&rarity))
        .field("tags", Kind::StringSet)
        .field("stats", Kind::record(&stats))
        .field("core", Kind::interface(&part))
        .field("parts", Kind::list(Kind::interface(&part)))
        .field("numbers", Kind::list(Kind::Int))
        .field("slots", Kind::map(Kind::String, Kind::record(&slot)))
        .field("levels", Kind::map(Kind::Int, Kind::Int))
        .field("weights", Kind::map(Kind::Float, Kind::Int))
        .build();

    let tags = TagRegistry::new()
        .with("weapon", &weapon)
        .with("armor", &armor)
        .with("effect_damage", &damage)
        .with("effect_heal", &heal)
        .with("stats", &stats);

    Fixture {
        unit,
        stats,
        weapon,
        armor,
        slot,
        tags: Arc::new(tags),
    }
}

/// A populated `Unit` config:
/// two weapon parts, numbers `[10, 20, 30]`, slots `left`/`right`,
/// levels `{1: 10, 2: 20}`, tags `{mech, light}`.
pub fn unit(fx: &Fixture) -> Value {
    let mut tags = IndexSet::new();
    tags.insert("mech".to_string());
    tags.insert("light".to_string());

    let parts = vec![
        Value::Record(Record::new(&fx.weapon).with("name", "cannon")),
        Value::Record(Record::new(&fx.weapon).with("name", "laser")),
    ];

    let mut slots = IndexMap::new();
    slots.insert(
        MapKey::from("left"),
        Value::Record(Record::new(&fx.slot).with("size", 1)),
    );
    slots.insert(
        MapKey::from("right"),
        Value::Record(Record::new(&fx.slot).with("size", 2)),
    );

    let mut levels = IndexMap::new();
    levels.insert(MapKey::Int(1), Value::Int(10));
    levels.insert(MapKey::Int(2), Value::Int(20));

    Value::Record(
        Record::new(&fx.unit)
            .with("name", "Light Mech")
            .with("level", 3)
            .with("tags", Value::StringSet(tags))
            .with("stats", Record::new(&fx.stats).with("hp", 100))
            .with("parts", Value::List(parts))
            .with(
                "numbers",
                Value::List(vec![Value::Int(10), Value::Int(20), Value::Int(30)]),
            )
            .with("slots", Value::Map(slots))
            .with("levels", Value::Map(levels))
            .with("weights", Value::Map(IndexMap::new())),
    )
}

pub fn session_with(fx: &Fixture, settings: Settings) -> Session<MemorySink> {
    Session::with_sink(settings, Arc::clone(&fx.tags), MemorySink::new())
}

/// Every channel on, fault latching on.
pub fn session(fx: &Fixture) -> Session<MemorySink> {
    session_with(fx, Settings::verbose())
}

/// Every channel on, fault latching off.
pub fn lenient_session(fx: &Fixture) -> Session<MemorySink> {
    session_with(
        fx,
        Settings {
            latch_faults: false,
            ..Settings::verbose()
        },
    )
}

pub fn spec(path: &str, value: &str) -> EditSpec {
    EditSpec::new(TYPE_NAME, FILE_KEY, path, value).from_mod(0, MOD_ID)
}

pub fn edit(session: &mut Session<MemorySink>, root: &mut Value, path: &str, value: &str) -> EditOutcome {
    session.process_field_edit(&spec(path, value), root)
}

/// Follows a dotted path through records, lists and maps.
pub fn lookup<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = root;
    for segment in path.split('.') {
        current = match current {
            Value::Record(record) => record.get(segment)?,
            Value::List(list) => list.get(segment.parse::<usize>().ok()?)?,
            Value::Map(map) => match map.get(&MapKey::from(segment)) {
                Some(value) => value,
                None => map.get(&MapKey::Int(segment.parse().ok()?))?,
            },
            _ => return None,
        };
    }
    Some(current)
}

pub fn at<'a>(root: &'a Value, path: &str) -> &'a Value {
    lookup(root, path).unwrap_or_else(|| panic!("nothing at {path}"))
}

pub fn list_len(root: &Value, path: &str) -> usize {
    at(root, path).as_list().map(Vec::len).unwrap_or_else(|| panic!("{path} is not a list"))
}

pub fn type_name_at(root: &Value, path: &str) -> String {
    at(root, path)
        .as_record()
        .map(|r| r.type_name().to_string())
        .unwrap_or_else(|| panic!("{path} is not a record"))
}

pub fn fault(outcome: &EditOutcome) -> &config_edit::EditFault {
    outcome
        .fault()
        .unwrap_or_else(|| panic!("expected a fault, got {outcome:?}"))
}
