// Codec for the byte-array-in-header representation of an embedded Lua
// payload: `const unsigned char name[] = { 0x.., ... };`
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;
use thiserror::Error;

const BYTES_PER_LINE: usize = 8;

lazy_static! {
    static ref DECLARATION: Regex = Regex::new(
        r"(?s)const\s+unsigned\s+char\s+([A-Za-z_][A-Za-z0-9_]*)\[\]\s*=\s*\{([^}]+)\};"
    )
    .unwrap();
    static ref HEX_VALUE: Regex = Regex::new(r"0x[0-9a-fA-F]+").unwrap();
}

#[derive(Debug, Error)]
pub enum EmbeddedError {
    #[error("no byte-array declaration found in header")]
    ArrayNotFound,
    #[error("byte value {0} does not fit in an unsigned char")]
    ByteOutOfRange(String),
    #[error("embedded payload is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// A byte-array declaration located inside a header, with the span it
/// occupies so a re-rendered declaration can be spliced back in place.
#[derive(Debug)]
pub struct EmbeddedArray {
    pub name: String,
    pub bytes: Vec<u8>,
    span: Range<usize>,
}

impl EmbeddedArray {
    /// Locate and decode the first byte-array declaration in `header`.
    pub fn extract(header: &str) -> Result<Self, EmbeddedError> {
        let caps = DECLARATION.captures(header).ok_or(EmbeddedError::ArrayNotFound)?;
        let span = caps.get(0).expect("match group 0 always present").range();
        let name = caps[1].to_string();

        let mut bytes = Vec::new();
        for token in HEX_VALUE.find_iter(&caps[2]) {
            let hex = &token.as_str()[2..];
            let value = u8::from_str_radix(hex, 16)
                .map_err(|_| EmbeddedError::ByteOutOfRange(token.as_str().to_string()))?;
            bytes.push(value);
        }

        Ok(Self { name, bytes, span })
    }

    /// Decode the payload as UTF-8 text.
    pub fn text(&self) -> Result<String, EmbeddedError> {
        Ok(String::from_utf8(self.bytes.clone())?)
    }

    /// Splice a declaration holding `payload` over this array's span in
    /// `header`, keeping the array name and everything outside the span.
    pub fn replace_in(&self, header: &str, payload: &[u8]) -> String {
        let mut out = String::with_capacity(header.len());
        out.push_str(&header[..self.span.start]);
        out.push_str(&render_declaration(&self.name, payload));
        out.push_str(&header[self.span.end..]);
        out
    }
}

/// Render raw bytes as the literal body: 8 bytes per line, four-space
/// indent, lowercase two-digit hex, every line comma-terminated. Stable:
/// re-encoding unchanged bytes reproduces identical text.
pub fn render_byte_array(data: &[u8]) -> String {
    data.chunks(BYTES_PER_LINE)
        .map(|chunk| {
            let values: Vec<String> = chunk.iter().map(|b| format!("0x{:02x}", b)).collect();
            format!("    {},", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_declaration(name: &str, data: &[u8]) -> String {
    format!(
        "const unsigned char {}[] = {{\n{}\n}};",
        name,
        render_byte_array(data)
    )
}

/// Emit a complete generated header embedding `payload` verbatim:
/// include guard, generated-from comment, byte array, size constant.
pub fn generate_header(payload_filename: &str, payload: &[u8]) -> String {
    format!(
        "\n\
         // Auto-generated from {}\n\
         // This file contains the snake_case version of the nogame.lua screen\n\
         #ifndef LOVE_NOGAME_LUA_H\n\
         #define LOVE_NOGAME_LUA_H\n\
         \n\
         // [nogame.lua]\n\
         const unsigned char nogame_lua[] = {{\n\
         {}\n\
         }};\n\
         \n\
         const unsigned int nogame_lua_size = sizeof(nogame_lua);\n\
         \n\
         #endif // LOVE_NOGAME_LUA_H\n",
        payload_filename,
        render_byte_array(payload)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_header(body: &str) -> String {
        format!(
            "#ifndef LOVE_NOGAME_LUA_H\n#define LOVE_NOGAME_LUA_H\n\nconst unsigned char nogame_lua[] = {{\n{}\n}};\n\nconst unsigned int nogame_lua_size = sizeof(nogame_lua);\n\n#endif\n",
            body
        )
    }

    #[test]
    fn test_extract_bytes_in_order() {
        let header = sample_header("    0x6c, 0x6f, 0x76, 0x65,");
        let array = EmbeddedArray::extract(&header).unwrap();
        assert_eq!(array.name, "nogame_lua");
        assert_eq!(array.bytes, b"love");
        assert_eq!(array.text().unwrap(), "love");
    }

    #[test]
    fn test_extract_missing_declaration() {
        let err = EmbeddedArray::extract("int x = 1;").unwrap_err();
        assert!(matches!(err, EmbeddedError::ArrayNotFound));
    }

    #[test]
    fn test_invalid_utf8_reported() {
        let header = sample_header("    0xff, 0xfe,");
        let array = EmbeddedArray::extract(&header).unwrap();
        assert!(matches!(
            array.text().unwrap_err(),
            EmbeddedError::InvalidUtf8(_)
        ));
    }

    #[test]
    fn test_round_trip() {
        let payload: Vec<u8> = (0..=255).collect();
        let header = format!(
            "const unsigned char data[] = {{\n{}\n}};",
            render_byte_array(&payload)
        );
        let array = EmbeddedArray::extract(&header).unwrap();
        assert_eq!(array.bytes, payload);
    }

    #[test]
    fn test_render_fixed_width_lines() {
        let rendered = render_byte_array(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09]);
        assert_eq!(
            rendered,
            "    0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,\n    0x09,"
        );
    }

    #[test]
    fn test_stable_reencode_of_unchanged_payload() {
        let payload = b"function love.load()\nend\n";
        let header = sample_header(&render_byte_array(payload));
        let array = EmbeddedArray::extract(&header).unwrap();
        let reembedded = array.replace_in(&header, &array.bytes);
        assert_eq!(reembedded, header);
    }

    #[test]
    fn test_replace_preserves_surroundings() {
        let header = sample_header("    0x61, 0x62,");
        let array = EmbeddedArray::extract(&header).unwrap();
        let out = array.replace_in(&header, b"xyz");
        assert!(out.starts_with("#ifndef LOVE_NOGAME_LUA_H"));
        assert!(out.contains("const unsigned char nogame_lua[] = {\n    0x78, 0x79, 0x7a,\n};"));
        assert!(out.ends_with("const unsigned int nogame_lua_size = sizeof(nogame_lua);\n\n#endif\n"));
    }

    #[test]
    fn test_generated_header_shape() {
        let header = generate_header("nogame.lua", b"print('hi')\n");
        assert!(header.contains("// Auto-generated from nogame.lua"));
        assert!(header.contains("#ifndef LOVE_NOGAME_LUA_H"));
        assert!(header.contains("const unsigned int nogame_lua_size = sizeof(nogame_lua);"));
        let array = EmbeddedArray::extract(&header).unwrap();
        assert_eq!(array.bytes, b"print('hi')\n");
    }
}
