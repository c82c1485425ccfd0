//! Static tagged-line corpora used across harnesses.
//!
//! Lines follow the device log convention: the first byte is the severity
//! tag (`F E W N T V`), the terminator is `\n`. Untagged lines stand in
//! for console noise that must never reach the structured sinks.

/// A small sample of tagged lines covering every severity.
pub const CORPUS_TAGGED: &[&str] = &[
    "Fwatchdog reset imminent\n",
    "Emqtt connect failed rc=-2\n",
    "Wheap low: 18432 bytes free\n",
    "Nboot complete, fw 2.4.1\n",
    "Tloop took 12ms\n",
    "Vgpio poll tick\n",
];

/// Lines with no recognizable severity tag.
pub const CORPUS_UNTAGGED: &[&str] = &[
    "hello from setup()\n",
    "--- marker ---\n",
    "42\n",
    "\n",
];

/// A mixed stream: tagged, untagged, and CRLF-terminated lines.
pub const CORPUS_MIXED: &[&str] = &[
    "Nwifi up, ip 192.168.4.7\n",
    "garbage before the logger started\n",
    "Wrssi -82 dBm\r\n",
    "Esensor i2c timeout\n",
    "Vpoll\n",
];

/// Generate `n` tagged lines cycling severities, for volume tests and
/// benches.
pub fn tagged_corpus(n: usize) -> Vec<String> {
    let tags = ['E', 'W', 'N', 'T'];
    (0..n)
        .map(|i| format!("{}sequence line {}\n", tags[i % tags.len()], i))
        .collect()
}
