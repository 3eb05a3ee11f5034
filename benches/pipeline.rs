use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use sitemap_csv::{extract, sanitize, to_csv};

fn large_sitemap(entries: usize) -> String {
    let mut src = String::from(
        "This XML file does not appear to have any style information associated with it.\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\" xmlns:xhtml=\"http://www.w3.org/1999/xhtml\">\n",
    );
    for i in 0..entries {
        src.push_str(&format!(
            "<url><loc>https://example.com/page/{i}?a=1&amp;b=2</loc><lastmod>2024-01-01</lastmod>\
             <changefreq>weekly</changefreq><priority>0.5</priority>\
             <xhtml:link rel=\"alternate\" hreflang=\"de\" href=\"https://example.com/de/page/{i}\"/></url>\n"
        ));
    }
    src.push_str("</urlset>");
    src
}

fn criterion_benchmark(c: &mut Criterion) {
    let src = large_sitemap(10_000);
    let sanitized = sanitize(&src);
    let records = extract(&sanitized).unwrap();

    c.bench_function("sanitize", |b| b.iter(|| sanitize(black_box(&src))));

    c.bench_function("extract", |b| b.iter(|| extract(black_box(&sanitized)).unwrap()));

    c.bench_function("to_csv", |b| b.iter(|| to_csv(black_box(&records))));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
