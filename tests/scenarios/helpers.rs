//! Test utility functions and fixture documents

use nestxml::quick_xml::Reader;

/// A small RSS feed with a declaration, attributes, escapes and optional nodes
pub const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
    <channel>
        <title>Release notes</title>
        <link href="https://example.com/notes?lang=en&amp;page=1"/>
        <item>
            <title>0.1.0</title>
            <description>First &lt;beta&gt; release</description>
        </item>
        <!-- drafts are not published -->
        <item>
            <title>0.1.1</title>
            <category/>
        </item>
    </channel>
</rss>
"#;

/// A settings document mixing empty flags and valued entries
pub const SETTINGS: &str = r#"
<settings>
    <entry key="threads">4</entry>
    <flag name="verbose"/>
    <entry key="output">/tmp/out</entry>
    <flag name="color"/>
</settings>
"#;

/// Create a reader over `input` with whitespace trimming enabled
pub fn trimmed_reader(input: &str) -> Reader<&[u8]> {
    let mut reader = Reader::from_str(input);
    reader.trim_text(true);
    reader
}

/// Write `contents` to a file inside a fresh temp directory
pub fn write_temp(name: &str, contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("Should create temp dir");
    let path = dir.path().join(name);
    std::fs::write(&path, contents).expect("Should write temp file");
    (dir, path)
}
