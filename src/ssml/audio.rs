/*!
 * Rewriting of audio clip URLs between the public content-delivery form
 * shown in the editor and the sound-library form the speech engine plays.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Public host serving the sound library clips
pub const DEFAULT_PUBLIC_PREFIX: &str = "https://d3qhmae9zx9eb.cloudfront.net";

/// Scheme the speech engine uses for sound library clips
pub const DEFAULT_LIBRARY_PREFIX: &str = "soundbank://soundlibrary";

/// File extension of public clips
pub const DEFAULT_EXTENSION: &str = ".mp3";

static DEFAULT_REWRITER: Lazy<AudioRewriter> = Lazy::new(|| {
    AudioRewriter::new(DEFAULT_PUBLIC_PREFIX, DEFAULT_LIBRARY_PREFIX, DEFAULT_EXTENSION)
        .expect("Invalid default audio rewrite pattern")
});

/// Bidirectional URL rewriter for audio clips.
#[derive(Debug, Clone)]
pub struct AudioRewriter {
    public_pattern: Regex,
    library_pattern: Regex,
    public_prefix: String,
    library_prefix: String,
    extension: String,
}

impl AudioRewriter {
    /// Create a rewriter for the given prefixes and extension.
    pub fn new(public_prefix: &str, library_prefix: &str, extension: &str) -> Result<Self, regex::Error> {
        let public_pattern = Regex::new(&format!(
            "{}(.*){}$",
            regex::escape(public_prefix),
            regex::escape(extension)
        ))?;
        let library_pattern = Regex::new(&format!("{}(.*)", regex::escape(library_prefix)))?;

        Ok(Self {
            public_pattern,
            library_pattern,
            public_prefix: public_prefix.to_string(),
            library_prefix: library_prefix.to_string(),
            extension: extension.to_string(),
        })
    }

    /// Shared rewriter with the default sound library locations.
    pub fn default_ref() -> &'static AudioRewriter {
        &DEFAULT_REWRITER
    }

    /// Rewrite a public clip URL into the sound library form.
    ///
    /// URLs that do not match the public pattern are returned unchanged.
    pub fn to_library(&self, url: &str) -> String {
        if !self.public_pattern.is_match(url) {
            debug!("Audio URL left unchanged: {}", url);
            return url.to_string();
        }
        let replacement = format!("{}${{1}}", self.library_prefix.replace('$', "$$"));
        self.public_pattern.replace(url, replacement.as_str()).into_owned()
    }

    /// Rewrite a sound library reference into its public URL.
    ///
    /// Anything else is returned unchanged.
    pub fn to_public(&self, reference: &str) -> String {
        let replacement = format!(
            "{}${{1}}{}",
            self.public_prefix.replace('$', "$$"),
            self.extension.replace('$', "$$")
        );
        self.library_pattern.replace(reference, replacement.as_str()).into_owned()
    }
}

impl Default for AudioRewriter {
    fn default() -> Self {
        DEFAULT_REWRITER.clone()
    }
}
