use conftree::*;
use criterion::*;

#[derive(Debug, PartialEq)]
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

#[derive(Debug, PartialEq)]
struct Cluster {
    name: String,
    primary: Endpoint,
    replicas: Vec<Endpoint>,
}

conf_record! {
    Cluster {
        name: String,
        primary: Endpoint,
        replicas: Vec<Endpoint>,
    }
}

fn endpoint(host: &str, port: u16) -> Conf {
    Conf::new_obj(vec![
        ("host", Conf::new_str(host)),
        ("port", Conf::new_num(port)),
    ])
}

fn extract_benches(c: &mut Criterion) {
    let scalar_tree = Conf::new_obj(vec![("port", Conf::new_num(8080))]);
    c.bench_function("extract scalar at path", |b| {
        b.iter(|| black_box(&scalar_tree).extract_at::<u16>("port"))
    });

    let list_tree = Conf::new_obj(vec![(
        "xs",
        Conf::new_list((0..128).map(Conf::new_num)),
    )]);
    c.bench_function("extract 128 element list", |b| {
        b.iter(|| black_box(&list_tree).extract_at::<Vec<i64>>("xs"))
    });

    let cluster_tree = Conf::new_obj(vec![
        ("name", Conf::new_str("gateway")),
        ("primary", endpoint("10.0.0.1", 443)),
        (
            "replicas",
            Conf::new_list((2..10).map(|n| endpoint(&format!("10.0.0.{}", n), 443))),
        ),
    ]);
    c.bench_function("extract nested record", |b| {
        b.iter(|| black_box(&cluster_tree).extract::<Cluster>())
    });

    let desc = Cluster::descriptor();
    let registry = Registry::global();
    c.bench_function("resolve record decoder", |b| {
        b.iter(|| registry.resolve(black_box(&desc)))
    });
}

criterion_group!(benches, extract_benches);
criterion_main!(benches);
