use conftree::*;
use rand::{distributions::Alphanumeric, Rng};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
enum LogLevel {
    Trace,
    Info,
    Warn,
}

conf_enum! { LogLevel { Trace, Info, Warn } }

#[derive(Debug, Clone, PartialEq)]
struct Endpoint {
    host: String,
    port: u16,
}

conf_record! {
    Endpoint {
        host: String,
        port: u16,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Service {
    name: String,
    level: LogLevel,
    primary: Endpoint,
    replicas: Vec<Endpoint>,
    labels: BTreeMap<String, String>,
    motd: Option<String>,
}

conf_record! {
    Service {
        name: String,
        level: LogLevel,
        primary: Endpoint,
        replicas: Vec<Endpoint>,
        labels: BTreeMap<String, String>,
        motd: Option<String>,
    }
}

fn random_string(rng: &mut impl Rng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn back<T: FromConf + ToConf>(value: T) -> Result<T, Error> {
    value.into_conf()?.extract()
}

#[test]
fn scalars_survive() {
    assert_eq!(back(true), Ok(true));
    assert_eq!(back(u8::MAX), Ok(u8::MAX));
    assert_eq!(back(i128::MIN), Ok(i128::MIN));
    assert_eq!(back(u128::MAX), Ok(u128::MAX));
    assert_eq!(back(-0.5f64), Ok(-0.5f64));
    assert_eq!(back("text".to_string()), Ok("text".to_string()));
}

#[test]
fn random_scalars_survive() {
    let mut rng = rand::thread_rng();
    for _ in 0..100 {
        let n: i64 = rng.gen();
        assert_eq!(back(n), Ok(n));
        let f: f64 = rng.gen();
        assert_eq!(back(f), Ok(f));
        let s = random_string(&mut rng, 12);
        assert_eq!(back(s.clone()), Ok(s));
    }
}

#[test]
fn collections_survive() {
    let xs = vec![3i32, 1, 4, 1, 5];
    assert_eq!(back(xs.clone()), Ok(xs));

    let mut map = BTreeMap::new();
    map.insert("alpha".to_string(), 1u32);
    map.insert("dotted.key".to_string(), 2);
    assert_eq!(back(map.clone()), Ok(map));
}

#[test]
fn composite_record_survives() {
    let svc = Service {
        name: "gateway".to_string(),
        level: LogLevel::Warn,
        primary: Endpoint {
            host: "10.0.0.1".to_string(),
            port: 443,
        },
        replicas: vec![
            Endpoint {
                host: "10.0.0.2".to_string(),
                port: 443,
            },
            Endpoint {
                host: "10.0.0.3".to_string(),
                port: 8443,
            },
        ],
        labels: vec![("env".to_string(), "prod".to_string())]
            .into_iter()
            .collect(),
        motd: Some("hello".to_string()),
    };

    assert_eq!(back(svc.clone()), Ok(svc));
}

#[test]
fn none_fields_are_omitted_and_recovered() {
    let svc = Service {
        name: "quiet".to_string(),
        level: LogLevel::Info,
        primary: Endpoint {
            host: "localhost".to_string(),
            port: 80,
        },
        replicas: Vec::new(),
        labels: BTreeMap::new(),
        motd: None,
    };

    let tree = svc.clone().into_conf().unwrap();
    // the absent option leaves no key behind
    assert!(!tree.exists("motd"));
    assert_eq!(tree.extract::<Service>(), Ok(svc));
}

#[test]
fn named_encoding_wraps_and_unwraps() {
    let ep = Endpoint {
        host: "example.com".to_string(),
        port: 9090,
    };
    let tree = ep.clone().into_conf_named("endpoint").unwrap();
    assert_eq!(tree.extract_at::<Endpoint>("endpoint"), Ok(ep));
}

#[test]
fn bare_none_cannot_encode() {
    let none: Option<u8> = None;
    assert_eq!(
        none.into_conf(),
        Err(Error::UnsupportedType("Option::None"))
    );
}

#[test]
fn non_string_map_keys_cannot_encode() {
    let mut map = BTreeMap::new();
    map.insert(1u8, "one".to_string());
    assert_eq!(
        map.into_conf(),
        Err(Error::UnsupportedType(std::any::type_name::<u8>()))
    );
}

#[test]
fn randomized_records_survive() {
    let mut rng = rand::thread_rng();
    for _ in 0..50 {
        let ep = Endpoint {
            host: random_string(&mut rng, 8),
            port: rng.gen(),
        };
        assert_eq!(back(ep.clone()), Ok(ep));
    }
}
