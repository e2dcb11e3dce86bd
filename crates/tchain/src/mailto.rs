//! `mailto` link helper for templates
//!
//! Builds an `<a href="mailto:...">` link and optionally obfuscates it so the
//! address is not readable in the page source.
use std::fmt::Write;

const HEX_MAILTO: &str = "&#109;&#97;&#105;&#108;&#116;&#111;&#58;";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MailtoEncoding {
    #[default]
    None,
    Javascript,
    JavascriptCharcode,
    Hex,
}

impl std::str::FromStr for MailtoEncoding {
    type Err = MailtoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(MailtoEncoding::None),
            "javascript" => Ok(MailtoEncoding::Javascript),
            "javascript_charcode" => Ok(MailtoEncoding::JavascriptCharcode),
            "hex" => Ok(MailtoEncoding::Hex),
            other => Err(MailtoError::UnknownEncoding {
                encoding: other.to_owned(),
            }),
        }
    }
}

/// Optional parameters of [mailto]
///
/// Query parameters are emitted in field order: `cc`, `bcc`, `followupto`,
/// `subject`, `newsgroups`. Empty `cc`, `bcc` and `followupto` are skipped.
#[derive(Debug, Clone, Default)]
pub struct MailtoOptions {
    /// Link text, defaults to the address
    pub text: Option<String>,
    /// Raw attributes added to the `<a>` tag
    pub extra: Option<String>,
    pub encode: MailtoEncoding,
    pub cc: Option<String>,
    pub bcc: Option<String>,
    pub followupto: Option<String>,
    pub subject: Option<String>,
    pub newsgroups: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MailtoError {
    #[error("mailto: 'encode' parameter must be none, javascript, javascript_charcode or hex (got {encoding:?})")]
    UnknownEncoding { encoding: String },
    #[error("mailto: hex encoding does not work with extra attributes. Try javascript.")]
    HexWithParameters,
}

pub fn mailto(address: &str, options: &MailtoOptions) -> Result<String, MailtoError> {
    let text = options.text.as_deref().unwrap_or(address);
    let extra = options.extra.as_deref().unwrap_or_default();
    let address = format!("{address}{}", query_string(options));

    let link = match options.encode {
        MailtoEncoding::None => format!(r#"<a href="mailto:{address}" {extra}>{text}</a>"#),
        MailtoEncoding::Javascript => javascript(&address, text, extra),
        MailtoEncoding::JavascriptCharcode => javascript_charcode(&address, text, extra),
        MailtoEncoding::Hex => hex(&address, text, extra)?,
    };

    Ok(link)
}

fn query_string(options: &MailtoOptions) -> String {
    let mut parameters = vec![];

    let addresses = [
        ("cc", &options.cc),
        ("bcc", &options.bcc),
        ("followupto", &options.followupto),
    ];
    for (key, value) in addresses {
        if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
            // @ and , stay readable in address lists
            let encoded = raw_url_encode(value)
                .replace("%40", "@")
                .replace("%2C", ",");
            parameters.push(format!("{key}={encoded}"));
        }
    }

    for (key, value) in [("subject", &options.subject), ("newsgroups", &options.newsgroups)] {
        if let Some(value) = value {
            parameters.push(format!("{key}={}", raw_url_encode(value)));
        }
    }

    if parameters.is_empty() {
        return String::new();
    }
    format!("?{}", parameters.join("&"))
}

/// RFC 3986 percent encoding, everything but unreserved characters
fn raw_url_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{byte:02X}");
        }
    }
    encoded
}

fn javascript(address: &str, text: &str, extra: &str) -> String {
    let script = format!(r#"document.write('<a href="mailto:{address}" {extra}>{text}</a>');"#);

    let mut escaped = String::with_capacity(script.len() * 3);
    for byte in script.bytes() {
        let _ = write!(escaped, "%{byte:02x}");
    }

    format!(r#"<script type="text/javascript">eval(unescape('{escaped}'))</script>"#)
}

fn javascript_charcode(address: &str, text: &str, extra: &str) -> String {
    let link = format!(r#"<a href="mailto:{address}" {extra}>{text}</a>"#);
    let char_codes: Vec<String> = link.bytes().map(|byte| byte.to_string()).collect();

    format!(
        "<script type=\"text/javascript\" language=\"javascript\">\n\
         <!--\n\
         {{document.write(String.fromCharCode({}))}}\n\
         //-->\n\
         </script>",
        char_codes.join(",")
    )
}

fn hex(address: &str, text: &str, extra: &str) -> Result<String, MailtoError> {
    if address.contains('?') {
        return Err(MailtoError::HexWithParameters);
    }

    let mut address_encoded = String::with_capacity(address.len() * 3);
    for c in address.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            let _ = write!(address_encoded, "%{:02x}", c as u8);
        } else {
            address_encoded.push(c);
        }
    }

    let mut text_encoded = String::with_capacity(text.len() * 6);
    for byte in text.bytes() {
        let _ = write!(text_encoded, "&#x{byte:02x};");
    }

    Ok(format!(
        r#"<a href="{HEX_MAILTO}{address_encoded}" {extra}>{text_encoded}</a>"#
    ))
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unescape(escaped: &str) -> String {
        let bytes: Vec<u8> = escaped
            .split('%')
            .skip(1)
            .map(|pair| u8::from_str_radix(pair, 16).unwrap())
            .collect();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn plain_link() {
        let link = mailto("me@example.com", &MailtoOptions::default()).unwrap();
        assert_eq!(link, r#"<a href="mailto:me@example.com" >me@example.com</a>"#);
    }

    #[test]
    fn text_and_extra() {
        let options = MailtoOptions {
            text: Some("Write us".into()),
            extra: Some(r#"class="mail""#.into()),
            ..Default::default()
        };

        let link = mailto("me@example.com", &options).unwrap();

        assert_eq!(
            link,
            r#"<a href="mailto:me@example.com" class="mail">Write us</a>"#
        );
    }

    #[test]
    fn query_parameters() {
        let options = MailtoOptions {
            cc: Some("a@b.c, d@e.f".into()),
            bcc: Some("".into()),
            subject: Some("Hello World".into()),
            ..Default::default()
        };

        let link = mailto("me@example.com", &options).unwrap();

        assert_eq!(
            link,
            r#"<a href="mailto:me@example.com?cc=a@b.c,%20d@e.f&subject=Hello%20World" >me@example.com</a>"#
        );
    }

    #[test]
    fn javascript_encoding() {
        let options = MailtoOptions {
            encode: MailtoEncoding::Javascript,
            ..Default::default()
        };

        let link = mailto("me@example.com", &options).unwrap();

        let escaped = link
            .strip_prefix(r#"<script type="text/javascript">eval(unescape('"#)
            .and_then(|rest| rest.strip_suffix("'))</script>"))
            .unwrap();
        assert_eq!(
            unescape(escaped),
            r#"document.write('<a href="mailto:me@example.com" >me@example.com</a>');"#
        );
    }

    #[test]
    fn javascript_charcode_encoding() {
        let options = MailtoOptions {
            text: Some("x".into()),
            encode: MailtoEncoding::JavascriptCharcode,
            ..Default::default()
        };

        let link = mailto("a@b", &options).unwrap();

        assert!(link.starts_with(
            "<script type=\"text/javascript\" language=\"javascript\">\n<!--\n{document.write(String.fromCharCode(60,97,32,104,"
        ));
        assert!(link.ends_with("62))}\n//-->\n</script>"));
    }

    #[test]
    fn hex_encoding() {
        let options = MailtoOptions {
            text: Some("ab".into()),
            encode: MailtoEncoding::Hex,
            ..Default::default()
        };

        let link = mailto("a.b@c", &options).unwrap();

        assert_eq!(
            link,
            r#"<a href="&#109;&#97;&#105;&#108;&#116;&#111;&#58;%61.%62@%63" >&#x61;&#x62;</a>"#
        );
    }

    #[test]
    fn hex_encoding_rejects_parameters() {
        let options = MailtoOptions {
            subject: Some("Hi".into()),
            encode: MailtoEncoding::Hex,
            ..Default::default()
        };

        assert_eq!(
            mailto("me@example.com", &options),
            Err(MailtoError::HexWithParameters)
        );
    }

    #[test]
    fn parse_encoding() {
        assert_eq!("".parse::<MailtoEncoding>(), Ok(MailtoEncoding::None));
        assert_eq!("hex".parse::<MailtoEncoding>(), Ok(MailtoEncoding::Hex));
        assert_eq!(
            "rot13".parse::<MailtoEncoding>(),
            Err(MailtoError::UnknownEncoding {
                encoding: "rot13".into()
            })
        );
    }
}
