#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(registry) = catalog::registry() else {
        return;
    };

    // A decoded PDU re-encodes to the bytes it came from.
    if let Ok(pdu) = registry.dispatch_decode(data) {
        let bytes = codec::encode(&pdu).expect("decoded PDU encodes");
        assert_eq!(bytes.len(), pdu.marshalled_size());
        let again = registry.dispatch_decode(&bytes).expect("re-encoded PDU decodes");
        assert_eq!(again, pdu);
    }

    let _ = registry.decode_datagram(data, &wire::Limits::default());
});
