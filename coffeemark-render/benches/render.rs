#![allow(
  clippy::expect_used,
  clippy::unwrap_used,
  reason = "Fine in benchmarks"
)]
use std::hint::black_box;

use coffeemark_render::Renderer;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

// Self-contained sample documents so the benchmark has no file fixtures to
// track. These are shaped like real posts: headings, emphasis, lists,
// a table, code, and the extension blocks.
const MD_SMALL: &str = "# A short post

Just a paragraph with **bold**, *italic* and a [link](https://example.com).

- one
- two
- three";

const MD_LARGE: &str = "# Chapter One

The morning was **cold** and the road was _long_. Our heroine carried
`a satchel of maps` and very little patience.

## Supplies

|Item|Qty|Notes|
|:---|--:|:---:|
|bread|2|stale|
|ink|1|half dry|
|rope|30|feet|

### Tasks

1. Leave before sunrise
2. [x] Pack the maps
3. [ ] Feed the horse

> The innkeeper warned us about the pass.
> Twice, in fact.

```
fn main() {
    println!(\"no markdown in here: **nope**\");
}
```

![the pass](img-proxy:https://example.com/images/pass.png)

Some closing text with an __underline__ and a literal\\nbreak.";

const MD_EXTENSIONS: &str = "<columns float=\"left\" width=\"35%\">
## Sidebar

- quick
- links
---
# Main story

A paragraph that gets its own **emphasis** handling inside the column.
</columns>

<bgc bg:#2a2a40 text:#eee>
An aside in a colored box.
</bgc>

<align center>Centered epigraph</align>

<poetry>
Roses are red,
violets are blue,
this block keeps
its line breaks too.
</poetry>";

fn bench_render(c: &mut Criterion) {
  let renderer = Renderer::default();
  let mut group = c.benchmark_group("render");

  for (name, doc) in [
    ("small", MD_SMALL),
    ("large", MD_LARGE),
    ("extensions", MD_EXTENSIONS),
  ] {
    group.bench_with_input(BenchmarkId::from_parameter(name), doc, |b, doc| {
      b.iter(|| renderer.render(black_box(doc)));
    });
  }

  group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
