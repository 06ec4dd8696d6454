use ipgen_common::{AddressCollector, AddressValue, Notation};

fn addr(s: &str) -> AddressValue {
    AddressValue::parse(s).unwrap()
}

fn strings(collection: &AddressCollector) -> Vec<String> {
    collection.generate().map(|a| a.to_string()).collect()
}

/// Every notation goes through the same collector and the counts add up.
#[test]
fn notations_drive_one_collection() {
    let mut collection = AddressCollector::new();
    for input in [
        "10.0.0.5",
        "10.0.1.1-10",
        "10.0.2.0/30",
        "10.0.3.1/255.255.255.252",
        "10.0.4.0~0.0.0.3",
        "10.0.5.1, 10.0.5.2",
    ] {
        let notation: Notation = input.parse().unwrap();
        notation.apply(&mut collection).unwrap();
    }

    assert_eq!(collection.len(), 1 + 10 + 4 + 4 + 4 + 2);
    assert!(collection.contains(&addr("10.0.3.0")));
    assert!(collection.contains(&addr("10.0.4.3")));
    assert!(!collection.contains(&addr("10.0.4.4")));
}

#[test]
fn exclusion_notations() {
    let mut collection = AddressCollector::new();
    collection.add_cidr("172.16.0.0/28").unwrap();

    for input in ["172.16.0.0", "172.16.0.14-15", "172.16.0.4/30", "172.16.0.8~0.0.0.1"] {
        let notation: Notation = input.parse().unwrap();
        notation.exclude(&mut collection).unwrap();
    }

    assert_eq!(
        strings(&collection),
        vec!["172.16.0.1", "172.16.0.2", "172.16.0.3", "172.16.0.10", "172.16.0.11", "172.16.0.12", "172.16.0.13"]
    );
    assert_eq!(collection.len(), 7);
}

#[test]
fn failed_list_leaves_collection_untouched() {
    let mut collection = AddressCollector::new();
    collection.add_ip("10.0.0.1").unwrap();

    let notation: Notation = "10.0.0.2, 10.0.0.9-10.0.0.3".parse().unwrap();
    assert!(notation.apply(&mut collection).is_err());
    assert_eq!(strings(&collection), vec!["10.0.0.1"]);
}

#[test]
fn mixed_families_count_and_enumerate() {
    let mut collection = AddressCollector::new();
    collection.add_cidr("fe80::/126").unwrap();
    collection.add_range("192.0.2.1", "192.0.2.2").unwrap();
    collection.add_ip("::1").unwrap();

    assert_eq!(collection.len(), 7);
    let listed = strings(&collection);
    assert_eq!(listed.first().map(String::as_str), Some("::1"));
    assert_eq!(listed.len(), 7);
}

#[test]
fn generate_is_restartable() {
    let mut collection = AddressCollector::new();
    collection.add_range("10.9.0.1", "10.9.0.3").unwrap();

    let first: Vec<_> = collection.generate().collect();
    let second: Vec<_> = (&collection).into_iter().collect();
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);
}
