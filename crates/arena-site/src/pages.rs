//! Fixed informational pages.
//!
//! Copy may reference the brand as `{site}`; it is substituted with the
//! configured site name at render time.

/// Structured-data shape of a static page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSchema {
    Home,
    About,
    Faq,
    Offers,
    Contact,
    Gallery,
    Franchise,
    Landlords,
    Schools,
    VipParty,
    Booking,
    Rules,
    Legal,
}

/// A fixed route with its copy and SEO fields.
#[derive(Debug, Clone, Copy)]
pub struct StaticPage {
    pub path: &'static str,
    /// Title before the configured suffix.
    pub title: &'static str,
    pub heading: &'static str,
    pub tagline: &'static str,
    pub description: &'static str,
    pub keywords: &'static str,
    pub body: &'static [&'static str],
    pub schema: PageSchema,
    /// Listed in the sitemap.
    pub indexed: bool,
}

impl StaticPage {
    pub fn keyword_list(&self) -> Vec<String> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// One question on the FAQ page.
#[derive(Debug, Clone, Copy)]
pub struct Faq {
    pub question: &'static str,
    pub answer: &'static str,
}

/// One entry in the offers catalog. `price` is `varies` for dynamic pricing.
#[derive(Debug, Clone, Copy)]
pub struct Offer {
    pub name: &'static str,
    pub description: &'static str,
    pub price: &'static str,
}

/// Replace the `{site}` placeholder in page copy.
pub fn brand(text: &str, site_name: &str) -> String {
    text.replace("{site}", site_name)
}

/// Look up a fixed page by exact path.
pub fn find(path: &str) -> Option<&'static StaticPage> {
    STATIC_PAGES.iter().find(|p| p.path == path)
}

pub const HOME: StaticPage = StaticPage {
    path: "/",
    title: "{site}",
    heading: "{site}",
    tagline: "The bounce revolution starts here.",
    description: "Unleash the bounce revolution at {site}, the ultimate trampoline park experience across the UK!",
    keywords: "{site}, trampoline parks uk, bounce revolution, dodgeball, foam pit",
    body: &[
        "Freestyle courts, dodgeball arenas, foam pits and parties for every age. Find your nearest park and book your next jump.",
    ],
    schema: PageSchema::Home,
    indexed: true,
};

pub static STATIC_PAGES: &[StaticPage] = &[
    HOME,
    StaticPage {
        path: "/about",
        title: "About {site}",
        heading: "About {site}",
        tagline: "Fun, safety and innovation since 2015.",
        description: "Learn about {site}, the leading trampoline park network in the UK, dedicated to fun, safety, and innovation since 2015.",
        keywords: "about {site}, trampoline parks uk, {site} history, leisure innovation",
        body: &[
            "{site} started with a single court and a simple idea: everyone deserves to fly.",
            "Today our parks welcome families, schools and teams across the UK, with trained marshals on every court.",
        ],
        schema: PageSchema::About,
        indexed: true,
    },
    StaticPage {
        path: "/arena-rules",
        title: "Arena Rules",
        heading: "Arena Rules",
        tagline: "Bounce big, bounce safe.",
        description: "Learn the safety rules and guidelines for an epic bounce at {site} trampoline parks across the UK.",
        keywords: "arena rules, {site} safety, trampoline guidelines, uk trampoline park",
        body: &[
            "One jumper per trampoline at all times.",
            "Grip socks must be worn on the courts.",
            "No somersaults or flips unless supervised in a designated area.",
            "Follow the instructions of court marshals at all times.",
        ],
        schema: PageSchema::Rules,
        indexed: true,
    },
    StaticPage {
        path: "/booking-now",
        title: "Book Your Jump",
        heading: "Book Your Jump",
        tagline: "Pick a park, pick a time, start bouncing.",
        description: "Book your trampoline session at {site} parks across the UK with easy online booking.",
        keywords: "{site} booking, trampoline park booking, uk jump sessions, book trampoline",
        body: &["Choose your nearest park to see live availability for open jumps, parties and classes."],
        schema: PageSchema::Booking,
        indexed: true,
    },
    StaticPage {
        path: "/contact",
        title: "Get in Touch",
        heading: "Get in Touch",
        tagline: "Questions, bookings, feedback. We are listening.",
        description: "Contact {site} for trampoline park inquiries, bookings, and support across the UK.",
        keywords: "{site} contact, trampoline park support, uk bounce inquiries, contact us",
        body: &["Reach your local park directly or send us a message and the team will get back to you."],
        schema: PageSchema::Contact,
        indexed: true,
    },
    StaticPage {
        path: "/faqs",
        title: "FAQs",
        heading: "Frequently Asked Questions",
        tagline: "Everything you need to know before you jump.",
        description: "Get answers to common questions about {site} trampoline parks across the UK.",
        keywords: "{site} faqs, trampoline park questions, uk trampoline info",
        body: &[],
        schema: PageSchema::Faq,
        indexed: true,
    },
    StaticPage {
        path: "/franchise",
        title: "Franchise with {site}",
        heading: "Franchise with {site}",
        tagline: "A turnkey trampoline park business.",
        description: "Join {site}'s franchise program for a turnkey trampoline park business opportunity across the UK.",
        keywords: "{site} franchise, trampoline park franchise, uk business opportunity, leisure franchise",
        body: &["We support franchise partners from site selection to opening day and beyond."],
        schema: PageSchema::Franchise,
        indexed: true,
    },
    StaticPage {
        path: "/gallery",
        title: "Gallery of Jumps",
        heading: "Gallery of Jumps",
        tagline: "The bounce revolution, captured.",
        description: "View stunning photos of {site} trampoline parks, capturing the bounce revolution across the UK.",
        keywords: "{site} gallery, trampoline park photos, uk trampoline images, bounce revolution",
        body: &["Big air, bigger smiles. A look inside our parks."],
        schema: PageSchema::Gallery,
        indexed: true,
    },
    StaticPage {
        path: "/landlords",
        title: "Landlords Partnership",
        heading: "Landlords Partnership",
        tagline: "Turn empty space into a destination.",
        description: "Join {site} as a landlord partner to expand trampoline parks across the UK with mutually beneficial opportunities.",
        keywords: "landlords partnership, {site} collaboration, uk trampoline parks, property investment",
        body: &["We look for large-format units with high ceilings and good parking. Get in touch to discuss your site."],
        schema: PageSchema::Landlords,
        indexed: true,
    },
    StaticPage {
        path: "/offers",
        title: "Offers",
        heading: "Offers",
        tagline: "More bounce for less.",
        description: "Explore exclusive trampoline park offers at {site}, including discounts on parties, jumps, and more across the UK.",
        keywords: "{site} offers, trampoline park discounts, party deals, uk trampoline promotions",
        body: &[],
        schema: PageSchema::Offers,
        indexed: true,
    },
    StaticPage {
        path: "/schools",
        title: "School Programs",
        heading: "School Programs",
        tagline: "PE lessons and school trips with a bounce.",
        description: "Explore {site}'s school programs, offering tailored trampoline packages for PE classes and school trips across the UK.",
        keywords: "school programs, trampoline park uk, pe classes, school trips, {site} education",
        body: &["Tailored packages for PE classes, rewards trips and end-of-term celebrations."],
        schema: PageSchema::Schools,
        indexed: true,
    },
    StaticPage {
        path: "/vip-party-package",
        title: "VIP Party Package",
        heading: "VIP Party Package",
        tagline: "Corporate team-building and birthdays done right.",
        description: "Discover {site}'s VIP Party Package for corporate team-building and kids' birthdays, starting at £12.50 per person across the UK.",
        keywords: "vip party package, corporate events, kids birthday parties, trampoline park uk, {site} packages",
        body: &["A private party room, a dedicated host, food and an hour of jumping, from £12.50 per person."],
        schema: PageSchema::VipParty,
        indexed: true,
    },
    StaticPage {
        path: "/legal/privacy",
        title: "Privacy Policy",
        heading: "Privacy Policy",
        tagline: "",
        description: "Read the Privacy Policy for the {site} website, ensuring no data collection or analytics usage.",
        keywords: "privacy policy, {site} blog, data protection, uk blog privacy",
        body: &["This website does not collect personal data and does not use analytics."],
        schema: PageSchema::Legal,
        indexed: false,
    },
    StaticPage {
        path: "/legal/tc",
        title: "Terms and Conditions",
        heading: "Terms and Conditions",
        tagline: "",
        description: "Review the Terms and Conditions for using the {site} website, covering content usage, liability, and more.",
        keywords: "terms and conditions, {site} blog, website terms, uk trampoline blog",
        body: &["Content on this website is provided for information only and may change without notice."],
        schema: PageSchema::Legal,
        indexed: false,
    },
];

pub static FAQS: &[Faq] = &[
    Faq {
        question: "How do I book?",
        answer: "To book, please visit our booking page or call your nearest park!",
    },
    Faq {
        question: "What is included in the party package?",
        answer: "Included in the price (from £9.99 per person), you get your hours bounce, safety socks, your own dedicated party host, your own VIP party room, and food supplied from a menu chosen by you and your party.",
    },
    Faq {
        question: "Can I pay at reception?",
        answer: "Yes, you can pay at reception, but this is subject to availability. We recommend booking online.",
    },
    Faq {
        question: "Can I reuse / use other parks trampoline socks?",
        answer: "As long as our staff say they are acceptable grip socks they are fine to be used.",
    },
    Faq {
        question: "How much is it to bounce?",
        answer: "Prices vary, access each site. Please click onto your preferred site.",
    },
    Faq {
        question: "Is there anyone to ensure the safety of my children?",
        answer: "Yes, there are court marshalls on the court at all times, who are all first aid and marshall trained.",
    },
    Faq {
        question: "Do you have baby changing?",
        answer: "Yes we have a baby changing facility.",
    },
    Faq {
        question: "Can I book the whole park exclusively?",
        answer: "Yes, we do offer private hire. To find out the best rate please contact your nearest park.",
    },
];

pub static OFFERS: &[Offer] = &[
    Offer {
        name: "20% Off Premium Parties",
        description: "Book in September, party anytime. Save 20% on premium birthday bounces (was £27.95/pp).",
        price: "22.36",
    },
    Offer {
        name: "20% Off Weekday Parties",
        description: "20% off Mon-Thu term time with code WEEKDAY20 for Classic, Premium, or UV parties.",
        price: "varies",
    },
    Offer {
        name: "Unlimited After School Jumps",
        description: "Unlimited jumps after 3pm Mon-Thu term time for one low price.",
        price: "varies",
    },
    Offer {
        name: "Student Bounce Discount",
        description: "20% off 90 or 120-min Open Jumps with valid ID and code STUDENT20.",
        price: "varies",
    },
    Offer {
        name: "Heroes Discount",
        description: "20% off for emergency services on 90/120-min jumps with Blue Light Card and code BLUELIGHT20.",
        price: "varies",
    },
    Offer {
        name: "Sunset Sessions",
        description: "2-hour jumps Fri & Sat evenings with disco lights and tunes for £19.95.",
        price: "19.95",
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut seen = HashSet::new();
        for page in STATIC_PAGES {
            assert!(seen.insert(page.path), "duplicate path {}", page.path);
        }
    }

    #[test]
    fn test_find() {
        assert_eq!(find("/faqs").map(|p| p.schema), Some(PageSchema::Faq));
        assert_eq!(find("/").map(|p| p.schema), Some(PageSchema::Home));
        assert!(find("/nope").is_none());
    }

    #[test]
    fn test_brand() {
        assert_eq!(brand("About {site}", "JumpArena"), "About JumpArena");
        assert_eq!(
            HOME.keyword_list().first().map(String::as_str),
            Some("{site}")
        );
    }
}
