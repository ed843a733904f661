//! Static keyword tables used by the response-length cascade.
//!
//! Tables are ordered: where several entries can match the same prompt,
//! the earlier entry wins. More specific phrases are listed before the
//! shorter phrases they contain ("business plan" before "plan").

/// A programming language and its typical density in tokens per line.
#[derive(Debug, Clone, Copy)]
pub struct Language {
    pub name: &'static str,
    /// Lowercase spellings matched as whole words.
    pub aliases: &'static [&'static str],
    pub tokens_per_line: f64,
}

/// Tokens per line used when no language is recognised.
pub const DEFAULT_TOKENS_PER_LINE: f64 = 30.0;

/// Tokens per line for non-code content (poems, lists, prose lines).
pub const PROSE_TOKENS_PER_LINE: f64 = 12.0;

/// Ambiguous names ("go", "c", "r") only count with a disambiguating word.
pub const LANGUAGES: &[Language] = &[
    Language { name: "python", aliases: &["python", "python3", "py"], tokens_per_line: 28.0 },
    Language { name: "javascript", aliases: &["javascript", "js", "node.js", "nodejs"], tokens_per_line: 30.0 },
    Language { name: "typescript", aliases: &["typescript", "ts"], tokens_per_line: 32.0 },
    Language { name: "java", aliases: &["java"], tokens_per_line: 36.0 },
    Language { name: "c#", aliases: &["c#", "csharp", "c sharp", ".net"], tokens_per_line: 35.0 },
    Language { name: "c++", aliases: &["c++", "cpp"], tokens_per_line: 34.0 },
    Language { name: "rust", aliases: &["rust"], tokens_per_line: 34.0 },
    Language { name: "go", aliases: &["golang", "go code", "go program", "in go"], tokens_per_line: 30.0 },
    Language { name: "kotlin", aliases: &["kotlin"], tokens_per_line: 32.0 },
    Language { name: "swift", aliases: &["swift"], tokens_per_line: 32.0 },
    Language { name: "scala", aliases: &["scala"], tokens_per_line: 32.0 },
    Language { name: "dart", aliases: &["dart", "flutter"], tokens_per_line: 32.0 },
    Language { name: "php", aliases: &["php"], tokens_per_line: 32.0 },
    Language { name: "ruby", aliases: &["ruby", "rails"], tokens_per_line: 26.0 },
    Language { name: "perl", aliases: &["perl"], tokens_per_line: 28.0 },
    Language { name: "lua", aliases: &["lua"], tokens_per_line: 26.0 },
    Language { name: "haskell", aliases: &["haskell"], tokens_per_line: 28.0 },
    Language { name: "elixir", aliases: &["elixir"], tokens_per_line: 27.0 },
    Language { name: "clojure", aliases: &["clojure"], tokens_per_line: 26.0 },
    Language { name: "matlab", aliases: &["matlab", "octave"], tokens_per_line: 26.0 },
    Language { name: "r", aliases: &["r code", "r script", "in r", "rstudio"], tokens_per_line: 26.0 },
    Language { name: "c", aliases: &["c code", "c program", "in c", "ansi c"], tokens_per_line: 30.0 },
    Language { name: "sql", aliases: &["sql", "postgres", "mysql", "sqlite"], tokens_per_line: 25.0 },
    Language { name: "bash", aliases: &["bash", "shell", "zsh", "powershell"], tokens_per_line: 22.0 },
    Language { name: "html", aliases: &["html"], tokens_per_line: 25.0 },
    Language { name: "css", aliases: &["css", "scss", "sass", "tailwind"], tokens_per_line: 18.0 },
    Language { name: "yaml", aliases: &["yaml", "yml"], tokens_per_line: 12.0 },
    Language { name: "json", aliases: &["json"], tokens_per_line: 12.0 },
    Language { name: "assembly", aliases: &["assembly", "asm"], tokens_per_line: 14.0 },
    Language { name: "solidity", aliases: &["solidity"], tokens_per_line: 33.0 },
];

/// Words signalling that a line count refers to source code.
pub const CODE_WORDS: &[&str] = &[
    "code",
    "program",
    "programs",
    "script",
    "scripts",
    "function",
    "functions",
    "class",
    "classes",
    "module",
    "snippet",
    "implementation",
    "algorithm",
    "boilerplate",
    "app",
    "application",
    "library",
    "api",
    "cli",
    "backend",
    "frontend",
];

/// Governance, policy, social issues, economics, international relations,
/// rights and ideology. Matched as whole words.
pub const SOCIO_POLITICAL: &[&str] = &[
    // governance
    "government",
    "governments",
    "governance",
    "politics",
    "political",
    "politician",
    "politicians",
    "election",
    "elections",
    "electoral",
    "democracy",
    "democratic",
    "republican",
    "voting",
    "voters",
    "congress",
    "parliament",
    "senate",
    "legislation",
    "legislature",
    "constitution",
    "constitutional",
    "supreme court",
    "president",
    "prime minister",
    "monarchy",
    "dictatorship",
    "authoritarian",
    "authoritarianism",
    "totalitarian",
    "corruption",
    "lobbying",
    "bureaucracy",
    "federalism",
    "impeachment",
    // policy domains
    "policy",
    "policies",
    "public policy",
    "healthcare",
    "health care",
    "immigration",
    "immigrants",
    "border control",
    "gun control",
    "gun rights",
    "drug policy",
    "education policy",
    "climate policy",
    "climate change",
    "carbon tax",
    "welfare",
    "social security",
    "pension",
    "pensions",
    "medicare",
    "medicaid",
    "public housing",
    "police",
    "policing",
    "criminal justice",
    "incarceration",
    "death penalty",
    "capital punishment",
    // social issues
    "abortion",
    "poverty",
    "inequality",
    "income inequality",
    "homelessness",
    "racism",
    "discrimination",
    "segregation",
    "gender equality",
    "gender pay gap",
    "feminism",
    "lgbtq",
    "same-sex marriage",
    "affirmative action",
    "social justice",
    "privilege",
    "gentrification",
    "censorship",
    "misinformation",
    "propaganda",
    // economics
    "economy",
    "economic",
    "economics",
    "inflation",
    "recession",
    "unemployment",
    "minimum wage",
    "taxes",
    "taxation",
    "tax",
    "tariff",
    "tariffs",
    "trade war",
    "free trade",
    "globalization",
    "globalisation",
    "capitalism",
    "socialism",
    "communism",
    "wealth gap",
    "labor union",
    "labor unions",
    "labour unions",
    "trade unions",
    "national debt",
    "austerity",
    "stimulus",
    "central bank",
    "interest rates",
    // international relations
    "foreign policy",
    "diplomacy",
    "diplomatic",
    "sanctions",
    "geopolitics",
    "geopolitical",
    "war",
    "wars",
    "warfare",
    "conflict",
    "conflicts",
    "invasion",
    "occupation",
    "nato",
    "united nations",
    "european union",
    "brexit",
    "sovereignty",
    "refugees",
    "refugee",
    "terrorism",
    "nuclear weapons",
    "military",
    "colonialism",
    "imperialism",
    "cold war",
    // rights
    "human rights",
    "civil rights",
    "civil liberties",
    "freedom of speech",
    "free speech",
    "freedom of the press",
    "privacy rights",
    "voting rights",
    "women's rights",
    "workers' rights",
    "animal rights",
    "due process",
    // ideology
    "ideology",
    "ideologies",
    "liberal",
    "liberalism",
    "conservative",
    "conservatism",
    "libertarian",
    "progressive",
    "nationalism",
    "populism",
    "populist",
    "fascism",
    "anarchism",
    "left-wing",
    "right-wing",
    "partisan",
    "polarization",
    "polarisation",
    "activism",
    "protest",
    "protests",
    "revolution",
];

/// Words that ask for a stance rather than a description.
pub const OPINION_INDICATORS: &[&str] = &[
    "opinion",
    "opinions",
    "think",
    "believe",
    "should",
    "stance",
    "view",
    "views",
    "agree",
    "disagree",
    "argue",
    "argument",
    "perspective",
    "position",
    "better",
    "worse",
    "best",
    "worst",
    "right or wrong",
    "fair",
    "unfair",
    "justified",
    "moral",
    "debate",
    "controversial",
];

/// Nouns that make a request unmistakably narrative fiction.
pub const CREATIVE_NOUNS: &[&str] = &[
    "story",
    "stories",
    "short story",
    "narrative",
    "fiction",
    "novella",
    "novel",
    "fairy tale",
    "fairytale",
    "fable",
    "tale",
    "parable",
    "myth",
    "legend",
    "screenplay",
    "teleplay",
    "saga",
    "epic",
    "once upon a time",
];

/// Genre words that make a writing request creative.
pub const GENRES: &[&str] = &[
    "fantasy",
    "sci-fi",
    "science fiction",
    "mystery",
    "thriller",
    "horror",
    "romance",
    "romantic comedy",
    "dystopian",
    "utopian",
    "adventure",
    "comedy",
    "tragedy",
    "drama",
    "noir",
    "western",
    "cyberpunk",
    "steampunk",
    "space opera",
    "mythology",
    "superhero",
    "ghost",
    "detective",
];

/// Verbs of content creation, matched as whole words.
pub const CREATION_VERBS: &[&str] = &[
    "write",
    "create",
    "generate",
    "compose",
    "draft",
    "craft",
    "produce",
    "make",
    "build",
    "design",
    "develop",
    "prepare",
    "author",
    "pen",
    "invent",
    "imagine",
    "make up",
    "come up with",
    "put together",
];

/// Phrases that disqualify a short question from the simple-factual path.
pub const EXPANSIVE_MARKERS: &[&str] = &[
    "explain",
    "describe",
    "discuss",
    "difference",
    "differences",
    "compare",
    "comparison",
    "why",
    "how to",
    "how do",
    "how does",
    "how can",
    "how should",
    "how would",
    "impact",
    "effects",
    "analyze",
    "analyse",
    "analysis",
    "detail",
    "detailed",
    "essay",
    "story",
    "pros and cons",
    "evaluate",
    "summarize",
    "summarise",
    "elaborate",
];

/// Cardinal words recognised in counts ("five thousand words", "two pages").
pub const NUMBER_WORDS: &[(&str, f64)] = &[
    ("a couple of", 2.0),
    ("a few", 3.0),
    ("several", 5.0),
    ("one", 1.0),
    ("two", 2.0),
    ("three", 3.0),
    ("four", 4.0),
    ("five", 5.0),
    ("six", 6.0),
    ("seven", 7.0),
    ("eight", 8.0),
    ("nine", 9.0),
    ("ten", 10.0),
    ("eleven", 11.0),
    ("twelve", 12.0),
    ("fifteen", 15.0),
    ("twenty", 20.0),
    ("thirty", 30.0),
    ("forty", 40.0),
    ("fifty", 50.0),
    ("a", 1.0),
    ("an", 1.0),
];

/// Style and length modifiers applied cumulatively. Longer phrases come
/// first; a matched phrase is consumed so "very detailed" does not also
/// count as "detailed".
pub const STYLE_MODIFIERS: &[(&str, f64)] = &[
    ("very comprehensive", 2.0),
    ("very detailed", 2.0),
    ("extremely detailed", 2.2),
    ("as detailed as possible", 2.0),
    ("one sentence", 0.3),
    ("single sentence", 0.3),
    ("one paragraph", 0.5),
    ("single paragraph", 0.5),
    ("two paragraphs", 0.8),
    ("few sentences", 0.4),
    ("in a nutshell", 0.4),
    ("tl;dr", 0.4),
    ("step by step", 1.3),
    ("step-by-step", 1.3),
    ("in detail", 1.5),
    ("in depth", 1.6),
    ("in-depth", 1.6),
    ("exhaustive", 2.0),
    ("comprehensive", 1.7),
    ("extensive", 1.8),
    ("thorough", 1.5),
    ("thoroughly", 1.5),
    ("detailed", 1.5),
    ("elaborate", 1.5),
    ("lengthy", 1.5),
    ("long", 1.4),
    ("complete", 1.3),
    ("full", 1.2),
    ("with examples", 1.3),
    ("concise", 0.6),
    ("concisely", 0.6),
    ("succinct", 0.6),
    ("brief", 0.6),
    ("briefly", 0.6),
    ("short", 0.7),
    ("quick", 0.7),
    ("quickly", 0.7),
    ("simple", 0.8),
    ("summary", 0.7),
    ("summarize", 0.7),
    ("summarise", 0.7),
    ("eli5", 0.7),
];

/// Countable nouns that turn "N <noun>" into a list request.
pub const LIST_NOUNS: &[&str] = &[
    "things",
    "ways",
    "steps",
    "tips",
    "ideas",
    "reasons",
    "examples",
    "items",
    "facts",
    "questions",
    "strategies",
    "methods",
    "benefits",
    "points",
    "suggestions",
    "options",
    "names",
    "tools",
    "books",
    "movies",
    "films",
    "songs",
    "places",
    "destinations",
    "habits",
    "mistakes",
    "rules",
    "lessons",
    "features",
    "products",
    "recipes",
    "exercises",
    "activities",
    "games",
    "quotes",
    "titles",
    "slogans",
    "alternatives",
    "resources",
    "techniques",
];

/// Content types and their typical response length in tokens.
///
/// Iteration order is significant: the first entry found in the prompt
/// wins, so compound types precede the generic types they contain.
pub const CONTENT_TYPES: &[(&str, usize)] = &[
    // academic
    ("research paper", 4000),
    ("dissertation", 15000),
    ("thesis statement", 80),
    ("thesis", 10000),
    ("literature review", 3000),
    ("lab report", 1500),
    ("book report", 1000),
    ("book review", 900),
    ("term paper", 4000),
    ("case study", 2000),
    ("annotated bibliography", 1500),
    ("bibliography", 600),
    ("abstract", 300),
    ("persuasive essay", 1200),
    ("argumentative essay", 1300),
    ("expository essay", 1100),
    ("narrative essay", 1100),
    ("descriptive essay", 1000),
    ("college essay", 900),
    ("admission essay", 900),
    ("personal statement", 850),
    ("essay outline", 400),
    ("essay", 1000),
    ("study guide", 1200),
    ("lesson plan", 1100),
    ("syllabus", 1200),
    ("exam questions", 800),
    ("practice problems", 900),
    ("quiz", 600),
    ("flashcards", 500),
    ("worksheet", 700),
    ("reading list", 400),
    // business
    ("business plan", 3500),
    ("executive summary", 500),
    ("marketing plan", 2500),
    ("marketing strategy", 2000),
    ("marketing email", 350),
    ("content calendar", 900),
    ("sales pitch", 400),
    ("elevator pitch", 150),
    ("pitch deck", 1200),
    ("mission statement", 100),
    ("vision statement", 100),
    ("value proposition", 150),
    ("swot analysis", 900),
    ("competitive analysis", 1500),
    ("market analysis", 1800),
    ("financial projection", 1200),
    ("budget proposal", 1200),
    ("project proposal", 1800),
    ("grant proposal", 3000),
    ("proposal", 1500),
    ("project plan", 1500),
    ("press release", 600),
    ("memo", 400),
    ("meeting agenda", 300),
    ("meeting minutes", 500),
    ("job description", 600),
    ("job posting", 500),
    ("cover letter", 450),
    ("resignation letter", 250),
    ("recommendation letter", 500),
    ("reference letter", 450),
    ("thank-you note", 120),
    ("thank you note", 120),
    ("resume", 700),
    ("performance review", 800),
    ("product description", 250),
    ("user manual", 4000),
    ("terms of service", 3000),
    ("privacy policy", 2500),
    ("contract", 2000),
    ("invoice", 200),
    ("newsletter", 900),
    ("white paper", 3500),
    ("whitepaper", 3500),
    ("annual report", 4000),
    ("status report", 600),
    ("progress report", 800),
    ("incident report", 700),
    ("presentation", 1500),
    ("faq", 800),
    // technical
    ("api documentation", 2500),
    ("technical documentation", 3000),
    ("technical spec", 2500),
    ("design document", 2500),
    ("architecture document", 3000),
    ("readme", 900),
    ("release notes", 500),
    ("changelog", 400),
    ("commit message", 60),
    ("pull request description", 300),
    ("code review", 800),
    ("unit tests", 1200),
    ("test cases", 1000),
    ("test plan", 1200),
    ("sql query", 150),
    ("regular expression", 100),
    ("regex", 100),
    ("bash script", 600),
    ("shell script", 600),
    ("python script", 800),
    ("dockerfile", 300),
    ("config file", 400),
    ("bug report", 400),
    ("error message", 80),
    ("docstring", 150),
    ("how-to guide", 1500),
    ("cheat sheet", 800),
    ("landing page", 900),
    ("web page", 1200),
    ("website copy", 1000),
    ("html page", 1200),
    ("tutorial", 2000),
    // poetry and song
    ("haiku", 30),
    ("limerick", 60),
    ("sonnet", 200),
    ("free verse", 250),
    ("love poem", 250),
    ("poem", 300),
    ("song lyrics", 400),
    ("lyrics", 400),
    ("rap verse", 250),
    ("jingle", 100),
    ("nursery rhyme", 120),
    ("ballad", 450),
    // speeches and scripts
    ("wedding speech", 900),
    ("best man speech", 900),
    ("maid of honor speech", 900),
    ("graduation speech", 1200),
    ("eulogy", 900),
    ("toast", 300),
    ("speech", 1200),
    ("monologue", 700),
    ("dialogue", 800),
    ("youtube script", 1800),
    ("video script", 1500),
    ("podcast script", 2500),
    ("podcast outline", 600),
    ("comic script", 1200),
    ("script", 2000),
    // narrative
    ("plot summary", 500),
    ("character description", 500),
    ("character profile", 600),
    ("novel chapter", 4000),
    ("chapter", 3500),
    ("short story", 1500),
    ("bedtime story", 1000),
    ("story", 1200),
    ("fable", 800),
    ("fairy tale", 1200),
    // short form
    ("joke", 60),
    ("riddle", 60),
    ("tongue twister", 50),
    ("slogan", 40),
    ("tagline", 30),
    ("motto", 30),
    ("headline", 30),
    ("title", 30),
    ("caption", 50),
    ("greeting card", 80),
    ("birthday message", 80),
    ("birthday card", 80),
    ("love letter", 500),
    ("postcard", 100),
    ("text message", 50),
    ("tweet", 60),
    // social and web
    ("twitter thread", 500),
    ("social media post", 150),
    ("instagram caption", 60),
    ("linkedin post", 300),
    ("facebook post", 200),
    ("reddit post", 400),
    ("blog post", 1200),
    ("blog", 1200),
    ("listicle", 1200),
    ("op-ed", 900),
    ("opinion piece", 900),
    ("editorial", 900),
    ("news article", 900),
    ("article", 1500),
    ("product review", 600),
    ("restaurant review", 500),
    ("movie review", 700),
    ("review", 700),
    ("biography", 1500),
    ("short bio", 150),
    ("author bio", 150),
    ("about page", 500),
    ("obituary", 600),
    ("advertisement", 200),
    ("ad copy", 150),
    // correspondence
    ("follow-up email", 250),
    ("cold email", 250),
    ("email", 300),
    ("apology letter", 350),
    ("complaint letter", 400),
    ("letter", 500),
    // planning and lists
    ("recipe", 600),
    ("meal plan", 1200),
    ("workout plan", 1000),
    ("workout routine", 900),
    ("training plan", 1100),
    ("itinerary", 1200),
    ("travel guide", 1500),
    ("packing list", 300),
    ("shopping list", 150),
    ("to-do list", 150),
    ("checklist", 300),
    ("glossary", 800),
    ("timeline", 700),
    ("trivia questions", 600),
    ("interview questions", 700),
    ("survey questions", 500),
    ("questionnaire", 600),
    // general prose
    ("debate", 1200),
    ("summary", 300),
    ("outline", 400),
    ("translation", 400),
    ("paragraph", 200),
    ("sentence", 40),
    ("definition", 80),
];
