/// Local hook generator
///
/// Each content type has a pool of three opening-line templates; unknown
/// types use the general pool. Type matching is exact.

use rand::Rng;

type Pool = [&'static str; 3];

const PODCAST: Pool = [
    "Hot take: {title}.",
    "I’m about to ruin your comfort with this: {title}.",
    "If you’ve been avoiding this topic, that’s why we’re doing it: {title}.",
];

const YOUTUBE: Pool = [
    "Stop doing this right now: {title}.",
    "I tested it so you don’t have to: {title}.",
    "Most people get this wrong: {title}.",
];

const TIKTOK: Pool = [
    "Nobody tells you this: {title}.",
    "Here’s the hack: {title}.",
    "If you do this, you’re playing yourself: {title}.",
];

const INSTAGRAM: Pool = [
    "Save this: {title}.",
    "A reminder you didn’t ask for: {title}.",
    "This is your sign: {title}.",
];

const BLOG: Pool = [
    "The real problem behind {title}",
    "{title}: a practical breakdown",
    "What changed when I finally understood {title}",
];

const NEWSLETTER: Pool = [
    "This week’s lesson: {title}.",
    "One thing I can’t unlearn: {title}.",
    "If you only read one thing today: {title}.",
];

const STREAM: Pool = [
    "Chat, we need to talk about {title}.",
    "Let’s break down {title} live.",
    "I’ve got thoughts on {title}.",
];

const GENERAL: Pool = [
    "Let’s talk about {title}.",
    "Here’s the truth: {title}.",
    "{title}, but the real version.",
];

fn templates(content_type: &str) -> Pool {
    match content_type {
        "Podcast" => PODCAST,
        "YouTube" => YOUTUBE,
        "TikTok" => TIKTOK,
        "Instagram" => INSTAGRAM,
        "Blog" => BLOG,
        "Newsletter" => NEWSLETTER,
        "Stream" => STREAM,
        _ => GENERAL,
    }
}

fn fill(template: &str, title: &str) -> String {
    template.replace("{title}", title)
}

/// All three hooks for a content type, title substituted
pub fn hook_pool(title: &str, content_type: &str) -> [String; 3] {
    templates(content_type).map(|template| fill(template, title))
}

/// Picks one hook uniformly at random from the type's pool
pub fn pick_hook<R: Rng + ?Sized>(title: &str, content_type: &str, rng: &mut R) -> String {
    let pool = templates(content_type);
    fill(pool[rng.gen_range(0..pool.len())], title)
}

/// [`pick_hook`] using the thread-local generator
pub fn hook_for(title: &str, content_type: &str) -> String {
    pick_hook(title, content_type, &mut rand::thread_rng())
}
