use grc_map::{FileCache, MappingCache, MappingStore, mapping_signature};
use grc_model::{FieldKey, FieldMapping};

fn sample_mapping() -> FieldMapping {
    let mut mapping = FieldMapping::new();
    mapping.set("codigo", Some(FieldKey::Code));
    mapping.set("nome", Some(FieldKey::Name));
    mapping.set("observacao", None);
    mapping
}

fn headers() -> Vec<String> {
    vec![
        "codigo".to_string(),
        "nome".to_string(),
        "observacao".to_string(),
    ]
}

#[test]
fn file_cache_round_trips_a_mapping() {
    let dir = tempfile::tempdir().unwrap();
    let store = MappingStore::new(FileCache::new(dir.path()).unwrap());

    store.save(&headers(), &sample_mapping());
    assert_eq!(store.load(&headers()), Some(sample_mapping()));
}

#[test]
fn file_cache_hit_is_order_independent() {
    let dir = tempfile::tempdir().unwrap();
    let store = MappingStore::new(FileCache::new(dir.path()).unwrap());
    store.save(&headers(), &sample_mapping());

    let permuted = vec![
        "observacao".to_string(),
        "codigo".to_string(),
        "nome".to_string(),
    ];
    assert_eq!(store.load(&permuted), Some(sample_mapping()));
}

#[test]
fn distinct_column_sets_do_not_collide() {
    let dir = tempfile::tempdir().unwrap();
    let store = MappingStore::new(FileCache::new(dir.path()).unwrap());
    store.save(&headers(), &sample_mapping());

    let other = vec!["peso".to_string(), "criticidade".to_string()];
    assert_eq!(store.load(&other), None);
}

#[test]
fn last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = MappingStore::new(FileCache::new(dir.path()).unwrap());
    store.save(&headers(), &sample_mapping());

    let mut updated = sample_mapping();
    updated.set("observacao", Some(FieldKey::Description));
    store.save(&headers(), &updated);

    assert_eq!(store.load(&headers()), Some(updated));
}

#[test]
fn corrupt_file_is_treated_as_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::new(dir.path()).unwrap();
    cache
        .set(&mapping_signature(&headers()), "not valid json")
        .unwrap();

    let store = MappingStore::new(cache);
    assert_eq!(store.load(&headers()), None);
}
