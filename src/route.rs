//! Request path classification.
//!
//! A request path is reduced to its path component (query and fragment
//! dropped, surrounding `/` trimmed) and then matched against an ordered table
//! of route grammars. The first grammar whose shape fits wins:
//!
//! | Grammar                     | Route                          |
//! |-----------------------------|--------------------------------|
//! | `guides/{state}/{utility}`  | [`RouteMatch::Guide`]          |
//! | `blog/{slug}`               | [`RouteMatch::Article`]        |
//! | `deal/{id}`                 | [`RouteMatch::OfferDetail`]    |
//!
//! An empty path is [`RouteMatch::Home`]; anything else is
//! [`RouteMatch::Unknown`]. Literal segments match case-sensitively and
//! parameters are taken verbatim, so `/Blog/x` is unknown and `/blog/My-Post`
//! keeps its casing.
//!
//! Each segment is percent-decoded after splitting, so `/blog/caf%C3%A9`
//! addresses the slug `café` while an encoded `%2F` stays inside its segment.
//! A segment that doesn't decode to UTF-8 is matched as written.

use std::borrow::Cow;

/// Parameters of a state/utility guide page.
///
/// `state` and `utility` are display forms (`NSW`, `Electricity`); the
/// `*_segment` fields keep the path segments as requested, which is what the
/// canonical URL uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuideRoute {
    pub state: String,
    pub utility: String,
    pub state_segment: String,
    pub utility_segment: String,
}

impl GuideRoute {
    pub fn new(state_segment: &str, utility_segment: &str) -> Self {
        Self {
            state: state_segment.to_uppercase(),
            utility: capitalize(utility_segment),
            state_segment: state_segment.to_string(),
            utility_segment: utility_segment.to_string(),
        }
    }
}

/// What a request path addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteMatch {
    Home,
    Article { slug: String },
    OfferDetail { id: String },
    Guide(GuideRoute),
    Unknown,
}

impl RouteMatch {
    /// Relative canonical path for the route (`blog/{slug}`, `deal/{id}`,
    /// ...). Home is the empty path; unknown routes have none.
    pub fn canonical_path(&self) -> Option<String> {
        match self {
            RouteMatch::Home => Some(String::new()),
            RouteMatch::Article { slug } => Some(format!("blog/{slug}")),
            RouteMatch::OfferDetail { id } => Some(format!("deal/{id}")),
            RouteMatch::Guide(guide) => Some(format!(
                "guides/{}/{}",
                guide.state_segment, guide.utility_segment
            )),
            RouteMatch::Unknown => None,
        }
    }

    /// Whether the route addresses an enumerable content record, i.e. one
    /// that lives in the metadata cache.
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            RouteMatch::Article { .. } | RouteMatch::OfferDetail { .. }
        )
    }

    /// Short label used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteMatch::Home => "home",
            RouteMatch::Article { .. } => "article",
            RouteMatch::OfferDetail { .. } => "offer",
            RouteMatch::Guide(_) => "guide",
            RouteMatch::Unknown => "unknown",
        }
    }
}

enum Segment {
    Literal(&'static str),
    Param,
}

struct Grammar {
    pattern: &'static [Segment],
    build: fn(&[&str]) -> RouteMatch,
}

const GRAMMARS: &[Grammar] = &[
    Grammar {
        pattern: &[Segment::Literal("guides"), Segment::Param, Segment::Param],
        build: build_guide,
    },
    Grammar {
        pattern: &[Segment::Literal("blog"), Segment::Param],
        build: build_article,
    },
    Grammar {
        pattern: &[Segment::Literal("deal"), Segment::Param],
        build: build_offer,
    },
];

fn build_guide(params: &[&str]) -> RouteMatch {
    RouteMatch::Guide(GuideRoute::new(params[0], params[1]))
}

fn build_article(params: &[&str]) -> RouteMatch {
    RouteMatch::Article {
        slug: params[0].to_string(),
    }
}

fn build_offer(params: &[&str]) -> RouteMatch {
    RouteMatch::OfferDetail {
        id: params[0].to_string(),
    }
}

/// Strip query string and fragment, then surrounding slashes.
pub fn normalize_path(raw: &str) -> &str {
    let end = raw.find(|c: char| c == '?' || c == '#').unwrap_or(raw.len());
    raw[..end].trim_matches('/')
}

/// Classify a raw request path.
pub fn classify(raw: &str) -> RouteMatch {
    let path = normalize_path(raw);
    if path.is_empty() {
        return RouteMatch::Home;
    }

    let decoded: Vec<Cow<'_, str>> = path
        .split('/')
        .map(|segment| urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment)))
        .collect();
    let segments: Vec<&str> = decoded.iter().map(|segment| segment.as_ref()).collect();
    GRAMMARS
        .iter()
        .find_map(|grammar| match_grammar(grammar, &segments))
        .unwrap_or(RouteMatch::Unknown)
}

fn match_grammar(grammar: &Grammar, segments: &[&str]) -> Option<RouteMatch> {
    if grammar.pattern.len() != segments.len() {
        return None;
    }
    let mut params = Vec::with_capacity(segments.len());
    for (expected, actual) in grammar.pattern.iter().zip(segments) {
        match expected {
            Segment::Literal(literal) if literal == actual => {}
            Segment::Literal(_) => return None,
            Segment::Param if actual.is_empty() => return None,
            Segment::Param => params.push(*actual),
        }
    }
    Some((grammar.build)(&params))
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
