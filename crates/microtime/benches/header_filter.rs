use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use header_microtime::{MicrotimeModule, SystemClock, build_server};
use http::Request;
use microtime_http::codec::HeaderDecoder;
use microtime_http::conf::Conf;
use microtime_http::protocol::RequestHeader;
use std::hint::black_box;
use tokio_util::codec::Decoder;

const CONF: &str = r#"
location /on {
    header_microtime on;
    header_microtime_name "X-Test-Time";
}
location /off {
    header_microtime off;
}
"#;

fn bench_respond(c: &mut Criterion) {
    let conf = Conf::parse(CONF).unwrap();
    let server = build_server(&conf, MicrotimeModule::with_clock(SystemClock)).unwrap();

    let enabled = RequestHeader::from(Request::get("/on").body(()).unwrap());
    let disabled = RequestHeader::from(Request::get("/off").body(()).unwrap());

    c.bench_function("respond_enabled", |b| b.iter(|| black_box(server.respond(black_box(&enabled)))));
    c.bench_function("respond_disabled", |b| b.iter(|| black_box(server.respond(black_box(&disabled)))));
}

fn bench_header_decoder(c: &mut Criterion) {
    let request = b"GET /on HTTP/1.1\r\nHost: 127.0.0.1:8080\r\nUser-Agent: curl/8.5.0\r\nAccept: */*\r\n\r\n";

    c.bench_function("decode_request_header", |b| {
        b.iter(|| {
            let mut bytes = BytesMut::from(&request[..]);
            black_box(HeaderDecoder.decode(&mut bytes).unwrap())
        });
    });
}

criterion_group!(benches, bench_respond, bench_header_decoder);
criterion_main!(benches);
