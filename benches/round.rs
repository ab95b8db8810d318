use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qr_round::{Document, RoundConfig, round_document};
use std::fmt::Write;

/// Deterministic QR-like pattern of `size`×`size` modules as an SVG string
fn synthetic_qr(size: usize) -> String {
    let mut svg = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    let mut state: u32 = 0x2545_f491;
    for row in 0..size {
        for col in 0..size {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            if state % 2 == 0 {
                let _ = write!(
                    svg,
                    r#"<rect x="{}" y="{}" width="16" height="16" fill="black"/>"#,
                    col * 16,
                    row * 16
                );
            }
        }
    }
    svg.push_str("</svg>");
    svg
}

fn bench_round_version_1(c: &mut Criterion) {
    let source = synthetic_qr(21);
    let config = RoundConfig::default();
    c.bench_function("round_21x21", |b| {
        b.iter(|| {
            let document = Document::from_svg_str(black_box(&source)).expect("parse");
            round_document(document, black_box(&config)).expect("round")
        })
    });
}

fn bench_round_version_40(c: &mut Criterion) {
    let source = synthetic_qr(177);
    let config = RoundConfig::default();
    c.bench_function("round_177x177", |b| {
        b.iter(|| {
            let document = Document::from_svg_str(black_box(&source)).expect("parse");
            round_document(document, black_box(&config)).expect("round")
        })
    });
}

fn bench_write_version_40(c: &mut Criterion) {
    let source = synthetic_qr(177);
    let document = Document::from_svg_str(&source).expect("parse");
    let rounded = round_document(document, &RoundConfig::default()).expect("round");
    c.bench_function("write_177x177", |b| b.iter(|| black_box(&rounded).to_svg()));
}

criterion_group!(
    benches,
    bench_round_version_1,
    bench_round_version_40,
    bench_write_version_40
);
criterion_main!(benches);
