#![no_main]
use barefmt_core::args;
use barefmt_core::stdio::{DeviceSink, DeviceWrite, format_to_buffer, format_to_device};
use libfuzzer_sys::fuzz_target;

struct CountingDevice(usize);

impl DeviceWrite for CountingDevice {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

fuzz_target!(|data: &[u8]| {
    // First byte sizes the destination buffer; the rest is the format string.
    let Some((&cap, fmt)) = data.split_first() else {
        return;
    };
    // Huge widths only measure padding speed.
    if fmt.contains(&b'*') || fmt.windows(5).any(|w| w.iter().all(u8::is_ascii_digit)) {
        return;
    }

    let argv = args![
        -1,
        u64::MAX,
        "fuzz",
        None::<&str>,
        1.5f64,
        f64::NAN,
        0x1000 as *const u8,
        i64::MIN,
    ];

    let mut out = vec![0u8; usize::from(cap)];
    match format_to_buffer(&mut out, fmt, &argv) {
        Ok(n) => {
            assert!(n < out.len());
            assert_eq!(out[n], 0);
        }
        Err(err) => {
            assert!(err.required() >= out.len());
            if let Some(&last) = out.last() {
                assert_eq!(last, 0);
            }
        }
    }

    let mut sink: DeviceSink<CountingDevice, 16> = DeviceSink::new(CountingDevice(0));
    format_to_device(&mut sink, fmt, &argv);
    assert!(sink.pending().len() < 16);
});
