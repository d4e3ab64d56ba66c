/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fixscan_tagvalue::{parse_utc_timestamp_micros, tokenize, RowErrors, SOH};

const NEW_ORDER: &[u8] = b"8=FIX.4.4|9=178|35=D|49=SENDER|56=TARGET|34=42|\
52=20231215-10:30:00.123|11=ORDER-000042|21=1|55=AAPL|54=1|60=20231215-10:30:00|\
38=100|40=2|44=150.50|59=0|10=092";

const EXEC_WITH_PARTIES: &[u8] = b"8=FIX.4.4|9=256|35=8|49=TARGET|56=SENDER|34=43|\
52=20231215-10:30:01.456|37=ORD-1|11=ORDER-000042|17=EXEC-1|150=F|39=2|55=AAPL|54=1|\
453=3|448=P1|447=D|452=1|448=P2|447=D|452=3|448=P3|447=D|452=11|\
38=100|14=100|151=0|31=150.50|32=100|6=150.50|10=121";

const SOH_ORDER: &[u8] = b"8=FIX.4.4\x019=178\x0135=D\x0149=SENDER\x0156=TARGET\x01\
34=42\x0152=20231215-10:30:00.123\x0111=ORDER-000042\x0155=AAPL\x0154=1\x0138=100\x01\
44=150.50\x0110=092";

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");

    group.bench_function("new_order_single", |b| {
        b.iter(|| tokenize(black_box(NEW_ORDER), b'|'));
    });

    group.bench_function("exec_report_with_parties", |b| {
        b.iter(|| tokenize(black_box(EXEC_WITH_PARTIES), b'|'));
    });

    group.bench_function("soh_delimiter", |b| {
        b.iter(|| tokenize(black_box(SOH_ORDER), SOH));
    });

    group.finish();
}

fn bench_timestamp(c: &mut Criterion) {
    c.bench_function("parse_utc_timestamp", |b| {
        b.iter(|| {
            let mut errors = RowErrors::new();
            parse_utc_timestamp_micros(
                black_box(b"20231215-10:30:00.123"),
                "SendingTime",
                &mut errors,
            )
        });
    });
}

criterion_group!(benches, bench_tokenize, bench_timestamp);
criterion_main!(benches);
