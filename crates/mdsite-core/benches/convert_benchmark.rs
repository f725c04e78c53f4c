//! Benchmarks comparing mdsite conversion against pulldown-cmark's HTML renderer
//!
//! Run with: cargo bench -p mdsite-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use mdsite_core::Converter;
use pulldown_cmark::{html, Options, Parser as MdParser};

const MARKDOWN_SAMPLE: &str = r#"---
title: "Release Notes"
---

# Release Notes

Version **2.4** ships a faster renderer, a `--base-path` flag and
_many_ small fixes reported by the community.

## Highlights

- Pages render in a single pass
- Static assets are copied before any page is written
  - Nested directories are mirrored
  - Unknown files stop the build
- Titles come from frontmatter first

1. Install the new binary
2. Run the build once to refresh the output tree
3. Publish the output directory

## Configuration

```
[site]
content = "content"
output = "docs"
base_path = "/notes/"
```

## Further reading

Read [the changelog](/changelog) and look at ![the logo](/images/logo.png) for branding.

> Rebuilding the whole site is cheap,
> so every build starts from an empty directory.

Thanks to everyone who filed issues.
"#;

fn pulldown_html(input: &str) -> String {
    let parser = MdParser::new_ext(input, Options::empty());
    let mut out = String::with_capacity(input.len() * 2);
    html::push_html(&mut out, parser);
    out
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    group.throughput(Throughput::Bytes(MARKDOWN_SAMPLE.len() as u64));

    let converter = Converter::new();
    group.bench_function("mdsite", |b| {
        b.iter(|| {
            let page = converter.convert(black_box(MARKDOWN_SAMPLE)).unwrap();
            black_box(page.html().len())
        })
    });

    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| black_box(pulldown_html(black_box(MARKDOWN_SAMPLE)).len()))
    });

    group.finish();
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaling");
    let converter = Converter::new();

    for size in [1, 5, 10, 20].iter() {
        // Repeat only the body so the frontmatter stays at the top.
        let body = mdsite_core::strip_frontmatter(MARKDOWN_SAMPLE);
        let content = format!("# Scaled\n\n{}", body.repeat(*size));

        group.throughput(Throughput::Bytes(content.len() as u64));

        group.bench_with_input(BenchmarkId::new("mdsite", size), &content, |b, content| {
            b.iter(|| {
                let root = converter.to_element(black_box(content)).unwrap();
                black_box(root.children().len())
            })
        });

        group.bench_with_input(
            BenchmarkId::new("pulldown_cmark", size),
            &content,
            |b, content| b.iter(|| black_box(pulldown_html(black_box(content)).len())),
        );
    }

    group.finish();
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    let text = "This has _emphasis_, **strong**, `code`, [link](https://example.com), and ![img](/a.png).";

    group.bench_function("mdsite_tokenize", |b| {
        b.iter(|| {
            let spans = mdsite_core::tokenize(black_box(text)).unwrap();
            black_box(spans.len())
        })
    });

    group.bench_function("pulldown_cmark", |b| {
        b.iter(|| black_box(pulldown_html(black_box(text)).len()))
    });

    group.finish();
}

criterion_group!(benches, bench_convert, bench_scaling, bench_inline);
criterion_main!(benches);
