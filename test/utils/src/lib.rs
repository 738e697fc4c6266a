/// A full response body as the agent backend streams it: comment and event
/// lines that must be skipped, two steps, a malformed line, and text deltas
/// with the last one missing its trailing newline.
pub fn stream_fixture() -> &'static str {
    return concat!(
        ": keep-alive\n",
        "event: message\n",
        "data: {\"type\":\"thinking\",\"content\":\"The user wants a sum.\"}\n",
        "\n",
        "data: {\"type\":\"tool_call\",\"tool_name\":\"calculator\",\"tool_args\":{\"expression\":\"2+2\"},\"tool_result\":\"4\"}\n",
        "\n",
        "data: {not json\n",
        "\n",
        "data: {\"content\":\"The answer \"}\n",
        "\n",
        "data: {\"content\":\"is 4.\"}",
    );
}

/// Splits a body into chunks of `size` bytes, ignoring char boundaries, the
/// same way a transport is free to.
pub fn chunked(body: &[u8], size: usize) -> Vec<Vec<u8>> {
    return body
        .chunks(size.max(1))
        .map(|chunk| return chunk.to_vec())
        .collect();
}
