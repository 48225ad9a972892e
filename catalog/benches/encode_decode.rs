use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use codec::Pdu;
use wire::PduType;

fn signal_pdu(samples: usize) -> Pdu {
    let mut pdu = catalog::create(PduType::Signal).expect("signal registered");
    for i in 0..samples {
        pdu.push_scalar("data", i as u8).expect("data list");
    }
    pdu
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    for (label, pdu) in [
        ("fire", catalog::create(PduType::Fire).expect("fire registered")),
        ("entity_state", catalog::create(PduType::EntityState).expect("entity state registered")),
        ("signal_480", signal_pdu(480)),
    ] {
        group.throughput(Throughput::Bytes(pdu.marshalled_size() as u64));
        group.bench_function(label, |b| {
            b.iter(|| catalog::encode(black_box(&pdu)).expect("encode"));
        });
    }
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let registry = catalog::registry().expect("registry");
    let mut group = c.benchmark_group("decode");
    for (label, pdu) in [
        ("fire", catalog::create(PduType::Fire).expect("fire registered")),
        ("signal_480", signal_pdu(480)),
    ] {
        let bytes = catalog::encode(&pdu).expect("encode");
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(label, |b| {
            b.iter(|| registry.dispatch_decode(black_box(&bytes)).expect("decode"));
        });
    }

    let mut datagram = Vec::new();
    for kind in [PduType::Fire, PduType::Detonation, PduType::Comment, PduType::Signal] {
        let pdu = registry.create(kind.raw()).expect("registered");
        datagram.extend(catalog::encode(&pdu).expect("encode"));
    }
    group.throughput(Throughput::Bytes(datagram.len() as u64));
    group.bench_function("datagram_of_four", |b| {
        b.iter(|| {
            registry
                .decode_datagram(black_box(&datagram), &wire::Limits::default())
                .expect("decode datagram")
        });
    });
    group.finish();
}

fn bench_hash(c: &mut Criterion) {
    let pdu = catalog::create(PduType::EntityState).expect("entity state registered");
    c.bench_function("stable_hash/entity_state", |b| {
        b.iter(|| black_box(&pdu).stable_hash());
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_hash);
criterion_main!(benches);
