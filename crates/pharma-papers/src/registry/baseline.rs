//! Built-in company list, always available without network access.
//!
//! Entries are lowercase and trimmed so the baseline registry is exactly this
//! list. Registry matching is substring based, so short ambiguous tokens
//! (for example "cro" or "icon"), words that occur inside place names
//! ("shire", "galapagos") and generic academic phrases ("life sciences") are
//! either spelled out as full company names or left out.

/// Known pharma/biotech companies, CROs and generic industry terms.
pub const COMPANIES: &[&str] = &[
    // Major pharmaceutical companies
    "pfizer",
    "johnson & johnson",
    "j&j",
    "janssen",
    "roche",
    "hoffmann-la roche",
    "novartis",
    "merck",
    "merck sharp & dohme",
    "gsk",
    "glaxosmithkline",
    "sanofi",
    "bristol myers squibb",
    "bristol-myers squibb",
    "bms",
    "abbvie",
    "abbott",
    "amgen",
    "gilead",
    "biogen",
    "celgene",
    "takeda",
    "bayer",
    "boehringer ingelheim",
    "eli lilly",
    "lilly",
    "astrazeneca",
    "novo nordisk",
    "teva pharmaceutical",
    "viatris",
    "mylan",
    "organon",
    "allergan",
    "shire pharmaceuticals",
    "daiichi sankyo",
    "astellas",
    "eisai",
    "otsuka pharmaceutical",
    "chugai pharmaceutical",
    "shionogi",
    "ucb pharma",
    "ucb biopharma",
    "lundbeck a/s",
    "ipsen",
    "servier",
    "grifols",
    "csl behring",
    "jazz pharmaceuticals",
    "sun pharma",
    "cipla",
    "dr. reddy's",
    "zoetis",
    "regeneron",
    "vertex",
    "alexion",
    "incyte",
    "illumina",
    "moderna",
    "biontech",
    "catalent",
    "lonza",
    "qiagen",
    "quintiles",
    "iqvia",
    // Biotech companies
    "genentech",
    "genmab",
    "seattle genetics",
    "seagen",
    "bluebird bio",
    "crispr therapeutics",
    "editas medicine",
    "intellia therapeutics",
    "sangamo therapeutics",
    "zinc finger",
    "car-t",
    "kite pharma",
    "juno therapeutics",
    "novocure",
    "neurocrine biosciences",
    "sage therapeutics",
    "alkermes",
    "acadia pharmaceuticals",
    "arena pharmaceuticals",
    "biomarin",
    "ultragenyx",
    "sarepta therapeutics",
    "alnylam pharmaceuticals",
    "ionis pharmaceuticals",
    "beigene",
    "argenx",
    "evotec",
    "celltrion",
    "biocon biologics",
    "samsung bioepis",
    "horizon therapeutics",
    "exelixis",
    "seres therapeutics",
    "beam therapeutics",
    "arcturus therapeutics",
    "novavax",
    "curevac",
    "bavarian nordic",
    "valneva",
    "antisense",
    "rna therapeutics",
    "gene therapy",
    // Contract research organizations
    "covance",
    "parexel",
    "psi cro",
    "syneos health",
    "ppd",
    "icon plc",
    "medpace",
    "wuxi",
    "charles river laboratories",
    "labcorp",
    "quest diagnostics",
    "pra health sciences",
    "fortrea",
    "certara",
    "eurofins",
    // Generic terms that often indicate pharma/biotech
    "pharmaceuticals",
    "pharmaceutical",
    "pharma",
    "biotech",
    "biotechnology",
    "biopharmaceutical",
    "biopharmaceuticals",
    "biopharma",
    "therapeutics",
    "medicines",
    "drug development",
    "clinical research",
    "medical affairs",
];
