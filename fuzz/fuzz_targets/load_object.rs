#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if !vmtdump::validate_elf(data) {
        return;
    }
    if let Ok(object) = vmtdump::load_object(data) {
        for symbol in object.vtable_symbols() {
            let _ = vmtdump::decode_and_render(data, symbol);
        }
    }
});
