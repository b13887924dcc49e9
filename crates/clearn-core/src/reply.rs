//! Canned reply policy for the study-assistant widget.
//!
//! Topics are checked in a fixed priority order with case-insensitive
//! keyword patterns and the first hit wins. Prompts that hit nothing get a
//! uniformly random acknowledgement from [`GENERIC_REPLIES`].

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyTopic {
    Help,
    Courses,
    Encouragement,
    Career,
    General,
}

pub const HELP_REPLY: &str = "I can help you explore our courses, suggest study techniques, \
talk through difficult topics, or point you toward career resources. What would you like to start with?";

pub const COURSE_REPLY: &str = "Our courses cover programming, data science, design and more. \
Each one is self-paced with hands-on projects, so you can learn by building. Browse the topics page to find a starting point.";

pub const ENCOURAGEMENT_REPLY: &str = "It's completely normal to find some topics difficult. \
Break the material into small steps, practise a little every day, and don't hesitate to revisit the basics. You've got this!";

pub const CAREER_REPLY: &str = "Building a career takes time. Focus on skills employers ask for, \
collect projects in a portfolio, and connect with people in the field. Our resources page lists guides for job preparation.";

pub const GENERIC_REPLIES: [&str; 12] = [
    "That's a great question! Let me think about how best to help.",
    "Interesting! Could you tell me a bit more about what you're looking for?",
    "Thanks for sharing. Learning is a journey, and every question moves you forward.",
    "I appreciate your curiosity! Exploring our topics page is a great next step.",
    "Good thinking! Consistent practice is the key to mastering any subject.",
    "I hear you. Try breaking that down into smaller questions and we can tackle them one by one.",
    "That's worth exploring. Our resources section has plenty of material on it.",
    "Great point! Staying curious is what makes a strong learner.",
    "Thanks for your message! Feel free to ask about courses, study tips or careers.",
    "Nice! Keep that momentum going and set yourself a small goal for today.",
    "Understood. Remember that every expert was once a beginner.",
    "Let's keep learning together. What would you like to explore next?",
];

/// Priority order; substring matches, so "learning" counts as "learn".
const TOPIC_PATTERNS: [(ReplyTopic, &str); 4] = [
    (ReplyTopic::Help, r"(?i)help|assist"),
    (ReplyTopic::Courses, r"(?i)course|learn"),
    (ReplyTopic::Encouragement, r"(?i)difficult|hard"),
    (ReplyTopic::Career, r"(?i)career|job"),
];

static TOPIC_MATCHERS: OnceLock<Vec<(ReplyTopic, Regex)>> = OnceLock::new();

fn topic_matchers() -> &'static [(ReplyTopic, Regex)] {
    TOPIC_MATCHERS.get_or_init(|| {
        TOPIC_PATTERNS
            .iter()
            .map(|(topic, pattern)| (*topic, Regex::new(pattern).expect("valid regex")))
            .collect()
    })
}

impl ReplyTopic {
    pub fn label(self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Courses => "courses",
            Self::Encouragement => "encouragement",
            Self::Career => "career",
            Self::General => "general",
        }
    }

    /// Fixed reply for keyword topics; `General` has none.
    pub fn canned_reply(self) -> Option<&'static str> {
        match self {
            Self::Help => Some(HELP_REPLY),
            Self::Courses => Some(COURSE_REPLY),
            Self::Encouragement => Some(ENCOURAGEMENT_REPLY),
            Self::Career => Some(CAREER_REPLY),
            Self::General => None,
        }
    }
}

pub fn classify(text: &str) -> ReplyTopic {
    topic_matchers()
        .iter()
        .find(|(_, matcher)| matcher.is_match(text))
        .map_or(ReplyTopic::General, |(topic, _)| *topic)
}

pub fn select_reply<R: Rng + ?Sized>(text: &str, rng: &mut R) -> &'static str {
    match classify(text).canned_reply() {
        Some(reply) => reply,
        None => GENERIC_REPLIES[rng.random_range(0..GENERIC_REPLIES.len())],
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::CAREER_REPLY;
    use super::COURSE_REPLY;
    use super::ENCOURAGEMENT_REPLY;
    use super::GENERIC_REPLIES;
    use super::HELP_REPLY;
    use super::ReplyTopic;
    use super::classify;
    use super::select_reply;
    use pretty_assertions::assert_eq;

    #[test]
    fn keyword_topics_follow_priority_order() {
        let cases = [
            ("I need help", ReplyTopic::Help),
            ("can you assist me?", ReplyTopic::Help),
            ("help me with my career", ReplyTopic::Help),
            ("I want to learn about hard courses", ReplyTopic::Courses),
            ("Tell me about courses", ReplyTopic::Courses),
            ("this is so difficult", ReplyTopic::Encouragement),
            ("calculus is HARD and my job hunt too", ReplyTopic::Encouragement),
            ("job prospects", ReplyTopic::Career),
            ("Career change ideas", ReplyTopic::Career),
            ("random gibberish", ReplyTopic::General),
            ("", ReplyTopic::General),
        ];
        for (prompt, expected) in cases {
            assert_eq!(classify(prompt), expected, "prompt: {prompt:?}");
        }
    }

    #[test]
    fn keyword_matching_ignores_case() {
        assert_eq!(classify("HELP"), ReplyTopic::Help);
        assert_eq!(classify("Assistance please"), ReplyTopic::Help);
        assert_eq!(classify("LEARNING"), ReplyTopic::Courses);
        assert_eq!(classify("My JoB search"), ReplyTopic::Career);
        assert_eq!(classify("ÉCOLE Course"), ReplyTopic::Courses);
    }

    #[test]
    fn every_topic_pattern_compiles() {
        let topics: Vec<ReplyTopic> = super::topic_matchers()
            .iter()
            .map(|(topic, _)| *topic)
            .collect();
        assert_eq!(
            topics,
            vec![
                ReplyTopic::Help,
                ReplyTopic::Courses,
                ReplyTopic::Encouragement,
                ReplyTopic::Career,
            ]
        );
    }

    #[test]
    fn keyword_replies_are_deterministic() {
        let cases = [
            ("I need help", HELP_REPLY),
            ("help me with my career", HELP_REPLY),
            ("Tell me about courses", COURSE_REPLY),
            ("this is so difficult", ENCOURAGEMENT_REPLY),
            ("job prospects", CAREER_REPLY),
        ];
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            for (prompt, expected) in cases {
                assert_eq!(select_reply(prompt, &mut rng), expected);
            }
        }
    }

    #[test]
    fn fallback_reply_comes_from_generic_pool() {
        assert!(GENERIC_REPLIES.len() >= 10);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let reply = select_reply("random gibberish", &mut rng);
            assert!(GENERIC_REPLIES.contains(&reply), "unexpected reply: {reply}");
        }
    }

    #[test]
    fn fallback_reply_is_reproducible_for_a_seed() {
        let mut first = StdRng::seed_from_u64(42);
        let mut second = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            assert_eq!(
                select_reply("what's up", &mut first),
                select_reply("what's up", &mut second)
            );
        }
    }
}
