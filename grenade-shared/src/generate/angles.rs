/// Local repurpose-angle generator

const TEMPLATES: [&str; 10] = [
    "Myth vs Fact: {title}",
    "3 mistakes people make with {title}",
    "The checklist for {title}",
    "What nobody mentions about {title}",
    "A quick story about {title}",
    "If you’re stuck, try this: {title}",
    "Unpopular opinion: {title}",
    "Beginner guide: {title}",
    "Advanced take: {title}",
    "One sentence that fixes {title}",
];

/// The ten repurpose angles for a title, always in the same order
pub fn repurpose_angles(title: &str) -> Vec<String> {
    TEMPLATES
        .iter()
        .map(|template| template.replace("{title}", title))
        .collect()
}
