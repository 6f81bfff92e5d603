//! Read-only name and pronoun tables used for speaker gender guesses.

use crate::segmenter::Gender;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

const MALE_NAMES: &[&str] = &[
    "james", "john", "robert", "michael", "william", "david", "richard", "joseph", "thomas",
    "charles", "christopher", "daniel", "matthew", "anthony", "mark", "donald", "steven", "paul",
    "andrew", "joshua", "kenneth", "kevin", "brian", "george", "timothy", "ronald", "edward",
    "jason", "jeffrey", "ryan", "jacob", "gary", "nicholas", "eric", "jonathan", "stephen",
    "larry", "justin", "scott", "brandon", "benjamin", "samuel", "raymond", "gregory", "frank",
    "alexander", "patrick", "jack", "henry", "peter", "harry", "arthur", "tom", "ben", "luke",
    "sam", "max", "alex", "adam", "nathan", "ethan", "noah", "oliver", "leo", "oscar", "charlie",
    "freddie", "alfie", "archie", "edmund", "felix", "hugo", "sebastian", "theodore", "vincent",
    "simon", "philip", "martin", "roger", "stanley", "bruce", "alan", "carl", "ralph", "roy",
    "eugene", "russell", "bobby", "howard", "fred", "albert", "clarence", "aragorn", "frodo",
    "gandalf", "legolas", "gimli", "boromir", "faramir", "saruman", "sauron", "bilbo", "samwise",
    "pippin", "merry", "dumbledore", "snape", "voldemort", "draco", "ron", "neville",
];

const FEMALE_NAMES: &[&str] = &[
    "mary", "patricia", "jennifer", "linda", "barbara", "elizabeth", "susan", "jessica", "sarah",
    "karen", "lisa", "nancy", "betty", "margaret", "sandra", "ashley", "dorothy", "kimberly",
    "emily", "donna", "michelle", "carol", "amanda", "melissa", "deborah", "stephanie", "rebecca",
    "sharon", "laura", "cynthia", "kathleen", "amy", "angela", "shirley", "anna", "brenda",
    "pamela", "emma", "nicole", "helen", "samantha", "katherine", "christine", "debra", "rachel",
    "carolyn", "janet", "catherine", "maria", "heather", "diane", "ruth", "julie", "olivia",
    "joyce", "virginia", "victoria", "kelly", "lauren", "christina", "joan", "evelyn", "judith",
    "andrea", "hannah", "megan", "cheryl", "jacqueline", "martha", "gloria", "teresa", "ann",
    "sara", "madison", "frances", "kathryn", "janice", "jean", "abigail", "alice", "judy",
    "sophia", "grace", "denise", "amber", "doris", "marilyn", "danielle", "beverly", "isabella",
    "theresa", "diana", "natalie", "brittany", "charlotte", "marie", "kayla", "alexis", "arwen",
    "galadriel", "eowyn", "hermione", "ginny", "luna", "bellatrix", "minerva", "molly", "lily",
];

static MALE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| MALE_NAMES.iter().copied().collect());
static FEMALE_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| FEMALE_NAMES.iter().copied().collect());

static RE_MALE_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:he|him|his|himself)\b").unwrap());
static RE_FEMALE_PRONOUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:she|her|hers|herself)\b").unwrap());

/// Looks up the first token of `name` in the gazetteers, ignoring case.
pub fn gender_for_name(name: &str) -> Option<Gender> {
    let first = name.split_whitespace().next()?.to_lowercase();
    if MALE_SET.contains(first.as_str()) {
        Some(Gender::Male)
    } else if FEMALE_SET.contains(first.as_str()) {
        Some(Gender::Female)
    } else {
        None
    }
}

/// Counts third-person singular pronouns; the strictly larger side wins.
pub fn gender_from_pronouns(context: &str) -> Gender {
    let male = RE_MALE_PRONOUN.find_iter(context).count();
    let female = RE_FEMALE_PRONOUN.find_iter(context).count();
    match male.cmp(&female) {
        std::cmp::Ordering::Greater => Gender::Male,
        std::cmp::Ordering::Less => Gender::Female,
        std::cmp::Ordering::Equal => Gender::Unknown,
    }
}
