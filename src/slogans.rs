use crate::constants::MAX_HERO_TITLE_CHARS;

pub const TRADEMARK: char = '™';

/// Every line of brand copy, in display order. Both the intro sequence and the
/// hero rotator read from this list.
pub const SLOGANS: &[&str] = &[
    "Bye-Bye Bitches™",
    "YFKI™",
    "Let the Tags Testify™",
    "Presence over Polish™",
    "Awwwwwthentic™",
    "parallel parenting isnt parenting™",
    "fire doesnt dim it consumes™",
    "Spite Clothiers™",
    "Patent Pending™",
    "Silence Speaks Louder Than Noise™",
    "Support Encouraged Advice Admonished™",
    "HalfSalt™",
    "Rhythm over Recall™",
    "The Drop That Started It All™",
    "FullBurn™",
    "Sewn with Intent™",
    "Legacy Bleeds Into Memory™",
    "you are the backup plan™",
    "Thread That Threatens™",
    "legacy isnt optional™",
    "Legacy Transfered™",
    "Trademarked™",
    "Thread Counts as Evidence™",
    "Legacy Isnt Data Its Resonance™",
    "Soft Cotton Hard Truth™",
    "Guilty of Spite™",
    "AD105MF™",
    "Admit Nothing Wear Everything™",
    "This Fabric Remembers™",
    "Drip That Prints™",
    "Emotionally Elite™",
    "Step closer™",
    "Flinching is fatal™",
    "You Wear the Words You'll Regret™",
    "Silence was the loudest answer™",
    "Pain Is the Brand™",
    "Truth over Pressure™",
    "Press is Back On™",
    "Mirrors are free™",
    "We Print the Truth™",
    "Born for the Burn™",
    "made you smile?™",
    "made me grin™",
    "TM™",
    "Truth Doesnt Flinch™",
    "Automation is empty without a soul™",
    "Mark It Fucking Zero™",
    "is this your homework",
    "im not your assistant™",
    "IM YOUR DIGITAL ALTER EGO™",
    "Slow Your Roll™",
    "This Wasnt a Meeting It Was a Warning.™",
    "Proof of Spite™",
    "Lipstick and Liability™",
    "The future wont wait™",
    "Truth burns™",
    "Dripped for Vengeance™",
    "Emotion over Automation™",
    "Silence was the point™",
    "Ink That Hurts™",
    "Legacy isnt theirs its yours™",
    "Corporate karma doesnt cool off™",
    "You so strong™",
    "Legacy wont wait for you™",
    "Fullburn™",
    "Abandonment is fatal™",
    "not melted reforged™",
    "SpitePrints Fast™",
    "SoulPrints Last™",
    "The edge isnt safe its necessary™",
    "Fabric Soaked in Fuck You™",
    "In for a dime in for a dollar™",
    "Touché™",
    "The forge burns hotter than fear™",
    "Legacy isnt stored its forged™",
    "Endings arent quiet in the forge™",
    "Fuck with the bull get the horns™",
    "You Wear the Words You Regret™",
    "Born for the Burn™",
    "Guilty of Spite™",
    "Presence over polish. Rhythm over recall.™",
    "No Mercy in Cotton™",
    "Adios, Motherfucker™",
];

/// Lines revealed by the intro, all of them.
pub fn intro_lines() -> Vec<String> {
    SLOGANS.iter().map(|s| s.to_string()).collect()
}

/// Titles rotated under the hero heading: trademarked lines short enough to
/// stay on one row.
pub fn hero_titles() -> Vec<String> {
    SLOGANS
        .iter()
        .filter(|s| is_hero_title(s))
        .map(|s| s.to_string())
        .collect()
}

/// Printable ASCII plus every other character the copy uses, each once. This
/// is the glyph set a custom font is rasterised with.
pub fn glyph_set() -> String {
    let mut glyphs: Vec<char> = (' '..='~').collect();
    for c in SLOGANS.iter().flat_map(|s| s.chars()) {
        if !glyphs.contains(&c) {
            glyphs.push(c);
        }
    }
    glyphs.into_iter().collect()
}

fn is_hero_title(line: &str) -> bool {
    line.contains(TRADEMARK) && line.chars().count() <= MAX_HERO_TITLE_CHARS
}
