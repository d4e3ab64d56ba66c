/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/1/26
******************************************************************************/

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fixscan_dictionary::embedded_fix44;
use fixscan_scan::parse_groups;
use fixscan_tagvalue::tokenize;

const EXEC_WITH_PARTIES: &[u8] = b"8=FIX.4.4|9=256|35=8|49=TARGET|56=SENDER|34=43|\
52=20231215-10:30:01.456|37=ORD-1|11=ORDER-000042|17=EXEC-1|150=F|39=2|55=AAPL|54=1|\
453=3|448=P1|447=D|452=1|448=P2|447=D|452=3|448=P3|447=D|452=11|\
38=100|14=100|151=0|31=150.50|32=100|6=150.50|10=121";

fn bench_group_parse(c: &mut Criterion) {
    let dictionary = embedded_fix44().unwrap();
    let msg = tokenize(EXEC_WITH_PARTIES, b'|');

    c.bench_function("parse_groups/three_parties", |b| {
        b.iter(|| parse_groups(black_box(&msg), black_box(&dictionary)));
    });
}

fn bench_dictionary_load(c: &mut Criterion) {
    c.bench_function("embedded_fix44_load", |b| {
        b.iter(|| embedded_fix44().unwrap());
    });
}

criterion_group!(benches, bench_group_parse, bench_dictionary_load);
criterion_main!(benches);
