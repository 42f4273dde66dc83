// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use pricewatch::specs::{extract, PageRules};

fn sample_doc() -> String {
    // A listing page trimmed to the parts extraction walks over, padded with noise.
    let mut doc = String::from(
        "<!DOCTYPE html><html><head><title>x</title>\
         <script>var p = '<span class=\"a-offscreen\">$0.00</span>';</script></head><body>",
    );
    for i in 0..400 {
        doc.push_str(&format!(
            "<div class=\"s-item\" data-i=\"{i}\"><a href=\"/dp/B{i:09}\">Related &amp; item {i}</a></div>"
        ));
    }
    doc.push_str(
        "<span id=\"productTitle\" class=\"a-size-large\">  Acme Widget,\n  Blue  </span>\
         <div class=\"a-section\"><span class=\"a-price\" data-a-size=\"xl\">\
         <span class=\"a-offscreen\">$1,299.99</span>\
         <span aria-hidden=\"true\"><span class=\"a-price-whole\">1,299<span class=\"a-price-decimal\">.</span></span>\
         <span class=\"a-price-fraction\">99</span></span></span></div></body></html>",
    );
    doc
}

fn bench_extract(c: &mut Criterion) {
    let doc = sample_doc();
    let rules = PageRules::default();

    c.bench_function("extract_listing", |b| {
        b.iter(|| {
            let listing = extract(black_box(&doc), &rules).ok();
            black_box(listing)
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
