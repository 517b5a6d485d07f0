//! Formatting benchmarks.

use barefmt_core::args;
use barefmt_core::stdio::{
    BufferSink, DeviceSink, DeviceWrite, format_to_buffer, format_to_device, render_float,
    render_uint,
};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Device that only counts what it receives.
struct NullDevice(usize);

impl DeviceWrite for NullDevice {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

fn bench_render_uint(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_uint");
    for &base in &[2u32, 8, 10, 16, 36] {
        group.bench_with_input(BenchmarkId::new("u64_max", base), &base, |b, &base| {
            let mut out = [0u8; 80];
            b.iter(|| {
                let mut sink = BufferSink::new(&mut out);
                render_uint(&mut sink, black_box(u64::MAX), base, 0, b' ', false);
                black_box(sink.finish())
            });
        });
    }
    group.finish();
}

fn bench_format_to_buffer(c: &mut Criterion) {
    let cases: &[(&str, &[u8])] = &[
        ("literal", b"no directives in this line at all\n"),
        ("int", b"%d %u %x %o"),
        ("padded", b"%08x|%-10d|%5s"),
        ("string", b"%s = %s"),
    ];
    let mut group = c.benchmark_group("format_to_buffer");
    for &(name, fmt) in cases {
        group.throughput(Throughput::Bytes(fmt.len() as u64));
        group.bench_function(name, |b| {
            let mut out = [0u8; 128];
            b.iter(|| {
                let argv = args![-12345, 4_000_000_000u32, 0xbeefu32, "value"];
                black_box(format_to_buffer(&mut out, black_box(fmt), &argv))
            });
        });
    }
    group.finish();
}

fn bench_render_float(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_float");
    for &value in &[0.5f64, 3.14159, 123_456.789, 1e30] {
        group.bench_with_input(BenchmarkId::from_parameter(value), &value, |b, &v| {
            let mut out = [0u8; 400];
            b.iter(|| {
                let mut sink = BufferSink::new(&mut out);
                render_float(&mut sink, black_box(v), 0, Some(6));
                black_box(sink.finish())
            });
        });
    }
    group.finish();
}

fn bench_device_lines(c: &mut Criterion) {
    let mut group = c.benchmark_group("device");
    group.bench_function("line_buffered", |b| {
        let mut sink: DeviceSink<NullDevice> = DeviceSink::new(NullDevice(0));
        b.iter(|| {
            format_to_device(
                &mut sink,
                b"cycle=%llu insn=%llu\n",
                &args![black_box(123_456_789u64), 987_654u64],
            )
        });
        black_box(sink.device().0);
    });
    group.bench_function("print_hex", |b| {
        let mut sink: DeviceSink<NullDevice> = DeviceSink::new(NullDevice(0));
        b.iter(|| sink.print_hex(black_box(0xdead_beef_cafe_f00d)));
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_render_uint,
    bench_format_to_buffer,
    bench_render_float,
    bench_device_lines
);
criterion_main!(benches);
