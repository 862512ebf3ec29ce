//! Prompt Builder
//!
//! Turns a (topic, tone) pair into the instruction text sent to the
//! completion endpoint.
//!
//! ## Structure
//!
//! 1. **Base guidelines**: word ceiling, structure, style and formatting rules
//!    shared by every tone
//! 2. **Tone addendum**: one block per [`Tone`]
//! 3. **Closing instruction**: names the topic again
//!
//! The scaffold itself never contains markdown emphasis or heading markers,
//! and never starts a line with a hyphen bullet, so it cannot prime the model
//! into the formatting it forbids. Output is fully deterministic.

use serde::{Deserialize, Serialize};

use crate::constants::content::MAX_WORDS;
use crate::types::BlogError;

// =============================================================================
// Tone
// =============================================================================

/// Writing-style directive steering prompt construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    /// Professional and structured
    #[default]
    Formal,
    /// Friendly and conversational
    Casual,
    /// Keyword-optimized
    Seo,
}

impl Tone {
    /// Every tone, in display order
    pub const ALL: [Tone; 3] = [Tone::Formal, Tone::Casual, Tone::Seo];

    /// Stable identifier used in config and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Casual => "casual",
            Tone::Seo => "seo",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Formal => "Formal",
            Tone::Casual => "Casual",
            Tone::Seo => "SEO-Friendly",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tone::Formal => "Professional & structured",
            Tone::Casual => "Friendly & conversational",
            Tone::Seo => "Keyword-optimized",
        }
    }

    /// Tone-specific instruction block appended after the base guidelines
    pub fn addendum(&self) -> &'static str {
        match self {
            Tone::Formal => FORMAL_TONE,
            Tone::Casual => CASUAL_TONE,
            Tone::Seo => SEO_TONE,
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = BlogError;

    /// Unknown values are a configuration error, never a silent fallback.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "formal" => Ok(Tone::Formal),
            "casual" => Ok(Tone::Casual),
            "seo" => Ok(Tone::Seo),
            _ => Err(BlogError::Config(format!(
                "Unknown tone '{}'. Valid values: formal, casual, seo",
                s
            ))),
        }
    }
}

// =============================================================================
// Prompt Construction
// =============================================================================

/// Build the full instruction text for a topic and tone.
///
/// The caller is responsible for trimming and for rejecting an empty topic;
/// an empty topic still yields a well-formed prompt.
pub fn build_prompt(topic: &str, tone: Tone) -> String {
    format!(
        "{}\n\n{}\n\nNow, write the blog post on \"{}\" following all the guidelines above.",
        base_guidelines(topic),
        tone.addendum(),
        topic
    )
}

fn base_guidelines(topic: &str) -> String {
    format!(
        r#"You are an expert blog writer and content strategist with years of experience creating viral, engaging, and SEO-optimized blog posts. Your writing style is authentic, human, and compelling.

Write a comprehensive, well-structured blog post on the topic: "{topic}"

CONTENT REQUIREMENTS:
1. WORD COUNT: Maximum {max_words} words (aim for 200 to {max_words} words for optimal engagement)

2. INTRODUCTION (first 2 or 3 sentences):
   • Start with a compelling hook: a surprising fact, a thought-provoking question, a relatable scenario, or a bold statement
   • Immediately establish the value proposition, so the reader knows why they should care
   • Create curiosity that makes them want to continue reading
   • Avoid generic openings like "In today's world" or "Have you ever wondered"

3. BODY STRUCTURE:
   • Use 2 or 3 clear, descriptive subheadings that break down the main points
   • Keep each paragraph to 2 to 4 sentences so it stays scannable
   • Use transition words naturally to create flow (however, moreover, for instance, similarly)
   • Include specific examples, statistics, or real-world applications when relevant
   • Use plain bullets or numbered lists for key takeaways or actionable items
   • Vary sentence length, mixing short punchy sentences with longer explanatory ones

4. CONTENT QUALITY:
   • Write in an active voice (prefer "We discovered" over "It was discovered")
   • Use power words and vivid language that creates mental images
   • Include storytelling elements: brief anecdotes, scenarios, or case studies
   • Add analogies and metaphors to explain complex concepts simply
   • Connect to the reader's experiences, challenges, or aspirations
   • Provide actionable insights, tips, or takeaways

5. SEO OPTIMIZATION:
   • Naturally incorporate the main topic keyword and related terms throughout
   • Use semantic variations and related keywords organically
   • Include the topic keyword in the first paragraph
   • Create descriptive subheadings that include relevant keywords
   • Avoid keyword stuffing; readability and natural flow come first
   • Write for humans first, search engines second

6. CONCLUSION (last 2 or 3 sentences):
   • Summarize the key points without repeating them verbatim
   • End with a strong takeaway or memorable statement
   • Include a clear call to action (for example "Try this today", "Share your thoughts", "Explore more")
   • Leave the reader with value and a sense of completion

7. WRITING STYLE:
   • Use a conversational, human tone, as if explaining to an intelligent friend
   • Avoid phrases that sound machine-written: "As an AI", "In conclusion", "In summary", "It's important to note that"
   • Cut filler words such as "very", "really", "quite", "basically", "essentially"
   • Use contractions naturally (don't, can't, it's) to sound more human
   • Write at a grade 8 to 10 reading level, accessible but not condescending
   • Keep the tense consistent, preferring present tense

8. FORMATTING RULES:
   • Do NOT use markdown formatting of any kind: no asterisks, no double asterisks, no hash symbols, no markdown syntax
   • Do NOT start bullet points with hyphens; use plain text bullets (•) or numbers instead
   • Write subheadings as plain text lines, not markdown headers
   • Put a blank line between paragraphs for readability
   • Keep formatting clean and simple, ready for direct publishing

9. ENGAGEMENT TECHNIQUES:
   • Ask rhetorical questions to engage readers
   • Speak directly to the reader as "you"
   • Include emotional triggers: curiosity, urgency, relatability, aspiration
   • Create a sense of discovery or revelation
   • Make complex topics accessible through simple explanations

10. AUTHENTICITY:
   • Write as if you have personal experience or deep knowledge of the topic
   • Use specific details rather than vague generalizations
   • Show, don't just tell, with examples and evidence
   • Be genuine and avoid overly promotional language
   • Write with confidence and authority

OUTPUT FORMAT:
   • Start directly with the introduction (no title needed)
   • Use clear paragraph breaks
   • Include subheadings as plain text
   • End with a strong conclusion
   • The entire post should be ready to publish as-is

Remember: your goal is content that readers will actually want to read, share, and remember. Quality over quantity; every word should add value."#,
        topic = topic,
        max_words = MAX_WORDS,
    )
}

const FORMAL_TONE: &str = r#"TONE SPECIFICATIONS: FORMAL
   • Use professional, authoritative language while remaining accessible
   • Employ sophisticated vocabulary where it fits, never overly complex
   • Maintain a respectful, business-appropriate tone
   • Use complete sentences and proper grammar throughout
   • Avoid slang, colloquialisms, or overly casual expressions
   • Structure content logically with clear, professional transitions
   • Present information with confidence and expertise
   • Suitable for: business blogs, professional publications, academic audiences, corporate content"#;

const CASUAL_TONE: &str = r#"TONE SPECIFICATIONS: CASUAL
   • Write as if chatting with a friend over coffee
   • Use everyday language that feels natural and relatable
   • Incorporate conversational phrases and friendly expressions
   • Use contractions liberally (don't, can't, we're, it's)
   • Use "you" and "we" frequently to create connection
   • Include light humor, personal touches, and relatable moments
   • Keep sentences shorter and more conversational
   • Use simple, clear language with no unexplained jargon
   • Suitable for: lifestyle blogs, personal blogs, social media content, general audiences"#;

const SEO_TONE: &str = r#"TONE SPECIFICATIONS: SEO-FRIENDLY
   • Balance natural readability with strategic keyword placement
   • Use the main topic keyword in the first paragraph naturally
   • Incorporate related keywords and semantic variations throughout
   • Create subheadings that include target keywords when possible
   • Use question-based subheadings (What is X? How does X work?)
   • Include long-tail keywords and phrases naturally
   • Structure content to answer common search queries
   • Mention related topics that invite internal linking
   • Include FAQ-style sections when relevant
   • Never sacrifice user experience for keywords
   • Suitable for: content marketing, SEO-focused blogs, search-driven content"#;
