use test_utils::chunked;
use test_utils::stream_fixture;

use super::StreamDecoder;
use crate::domain::models::EventRecord;

fn decode_all(chunks: Vec<Vec<u8>>) -> Vec<EventRecord> {
    let mut decoder = StreamDecoder::default();
    let mut records = vec![];
    for chunk in chunks {
        records.extend(decoder.feed(&chunk));
    }
    records.extend(decoder.finish());

    return records;
}

fn payloads(records: &[EventRecord]) -> Vec<&str> {
    return records
        .iter()
        .map(|record| return record.payload.as_str())
        .collect();
}

#[test]
fn it_decodes_multiple_lines_in_one_chunk() {
    let mut decoder = StreamDecoder::default();
    let records = decoder.feed(b"data: {\"content\":\"a\"}\ndata: {\"content\":\"b\"}\n");

    assert_eq!(
        payloads(&records),
        vec!["{\"content\":\"a\"}", "{\"content\":\"b\"}"]
    );
    assert!(decoder.finish().is_none());
}

#[test]
fn it_buffers_line_split_across_chunks() {
    let mut decoder = StreamDecoder::default();

    assert!(decoder.feed(b"data: {\"con").is_empty());
    assert!(decoder.feed(b"tent\":").is_empty());
    let records = decoder.feed(b"\"4\"}\n");

    assert_eq!(payloads(&records), vec!["{\"content\":\"4\"}"]);
}

#[test]
fn it_drops_lines_without_data_prefix() {
    let mut decoder = StreamDecoder::default();
    let records = decoder.feed(b"event: message\n: comment\n\nretry: 10\n");

    assert!(records.is_empty());
    assert!(decoder.finish().is_none());
}

#[test]
fn it_flushes_unterminated_final_line_once() {
    let mut decoder = StreamDecoder::default();
    let records = decoder.feed(b"data: first\ndata: last");
    assert_eq!(payloads(&records), vec!["first"]);

    let last = decoder.finish();
    assert_eq!(last.unwrap().payload, "last");
    assert!(decoder.finish().is_none());
}

#[test]
fn it_returns_nothing_on_finish_without_buffer() {
    let mut decoder = StreamDecoder::default();
    assert!(decoder.finish().is_none());
}

#[test]
fn it_handles_crlf_line_endings() {
    let mut decoder = StreamDecoder::default();
    let records = decoder.feed(b"data: one\r\n\r\ndata: two\r\n");

    assert_eq!(payloads(&records), vec!["one", "two"]);
}

#[test]
fn it_decodes_multibyte_chars_split_across_chunks() {
    let body = "data: {\"content\":\"héllo 🌍\"}\n".as_bytes();
    let records = decode_all(chunked(body, 1));

    assert_eq!(payloads(&records), vec!["{\"content\":\"héllo 🌍\"}"]);
}

#[test]
fn it_yields_same_records_regardless_of_chunk_boundaries() {
    let body = stream_fixture().as_bytes();
    let expected = decode_all(vec![body.to_vec()]);
    assert_eq!(expected.len(), 5);

    for size in 1..=body.len() {
        assert_eq!(decode_all(chunked(body, size)), expected, "chunk size {size}");
    }
}
