//! Static lookup tables for the Wii U release of the game.
//!
//! Ids are the values stored in ghost filenames and ghost bodies. Entries only exist for ids
//! confirmed in ghost data; DLC ids are missing until they are observed.

/// Courses by course id
pub(super) const COURSES: &[(u32, &str)] = &[
	(16, "Mario Circuit"),
	(17, "Thwomp Ruins"),
	(18, "Toad Harbour"),
	(19, "Sweet Sweet Canyon"),
	(20, "Twisted Mansion"),
	(21, "Shy Guy Falls"),
	(22, "Bone Dry Dunes"),
	(23, "Cloudtop Cruise"),
	(24, "Mount Wario"),
	(25, "Electrodrome"),
	(26, "Sunshine Airport"),
	(27, "Mario Kart Stadium"),
	(28, "Water Park"),
	(29, "Dolphin Shoals"),
	(30, "Bowser's Castle"),
	(31, "Rainbow Road"),
	(32, "3DS DK Jungle"),
	(33, "Wii Moo Moo Meadows"),
	(34, "N64 Royal Raceway"),
	(35, "N64 Toad's Turnpike"),
	(36, "DS Cheep Cheep Beach"),
	(37, "GCN Sherbet Land"),
	(38, "GBA Mario Circuit"),
	(39, "3DS Melody Motorway"),
	(40, "Wii Grumble Volcano"),
	(41, "SNES Donut Plains 3"),
	(42, "GCN Dry Dry Desert"),
	(43, "3DS Piranha Plant Pipeway"),
	(44, "DS Tick-Tock Clock"),
	(45, "N64 Yoshi Valley"),
	(46, "DS Wario Stadium"),
	(47, "N64 Rainbow Road"),
	(48, "Super Bell Subway"),
	(49, "Mute City"),
	(50, "Dragon Driftway"),
	(51, "Hyrule Circuit"),
	(52, "Animal Crossing (Summer)"),
	(53, "Excitebike Arena"),
	(54, "Wild Woods"),
	(55, "Ice Ice Outpost"),
	(56, "GCN Yoshi Circuit"),
	(57, "Wii Wario's Gold Mine"),
	(58, "SNES Rainbow Road"),
	(59, "GBA Ribbon Road"),
	(60, "3DS Neo Bowser City"),
	(61, "GCN Baby Park"),
	(62, "GBA Cheese Land"),
	(63, "Big Blue"),
	(64, "Animal Crossing (Spring)"),
	(65, "Animal Crossing (Autumn)"),
	(66, "Animal Crossing (Winter)"),
];

/// Characters by character id
pub(super) const CHARACTERS: &[&str] = &[
	"Mario",
	"Luigi",
	"Peach",
	"Daisy",
	"Yoshi (Green)",
	"Toad",
	"Toadette",
	"Koopa Troopa",
	"Bowser",
	"Donkey Kong",
	"Wario",
	"Waluigi",
	"Rosalina",
	"Metal Mario",
	"Pink Gold Peach",
	"Lakitu",
	"Shy Guy (Red)",
	"Baby Mario",
	"Baby Luigi",
	"Baby Peach",
	"Baby Daisy",
	"Baby Rosalina",
	"Larry",
	"Lemmy",
	"Wendy",
	"Ludwig von Koopa",
	"Iggy",
	"Roy",
	"Morton",
	"Mii (Standard)",
];

/// Kart bodies by kart id
pub(super) const KARTS: &[&str] = &[
	"Standard Kart",
	"Pipe Frame",
	"Mach 8",
	"Steel Driver",
	"Cat Cruiser",
	"Circuit Special",
	"Tri-Speeder",
	"Badwagon",
	"Prancer",
	"Buggybud",
	"Landship",
	"Bounder",
	"Sports Coupé",
	"Gold Kart",
	"Standard Bike",
	"Comet",
	"Sport Bike",
	"The Duke",
	"Flame Rider",
	"Varmint",
	"Mr Scooty",
	"Jet Bike",
	"Yoshi Bike",
	"Standard Quad",
	"Wild Wiggler",
	"Teddy Buggy",
];

/// Wheels by wheel id
pub(super) const WHEELS: &[&str] = &[
	"Normal",
	"Monster",
	"Roller",
	"Slim",
	"Slick",
	"Metal",
	"Button",
	"Off-Road",
	"Sponge",
	"Wooden",
	"Cushion",
	"Normal Blue",
	"Funky Monster",
	"Azure Roller",
	"Crimson Slim",
	"Cyber Slick",
	"Retro Off-Road",
	"Gold Wheels",
];

/// Gliders by glider id
pub(super) const GLIDERS: &[&str] = &[
	"Super Glider",
	"Cloud Glider",
	"Wario Wing",
	"Waddle Wing",
	"Peach Parasol",
	"Parachute",
	"Parafoil",
	"Flower Glider",
	"Bowser Kite",
	"Plane Glider",
	"MKTV Parafoil",
	"Gold Glider",
];

/// Region codes by flag id; `None` marks ids without a flag
pub(super) const FLAGS: &[Option<&str>] = &[
	None, Some("JP"), None, None, None, None, None, None,
	Some("AI"), Some("AG"), Some("AR"), Some("AW"), Some("BS"), Some("BB"), Some("BZ"), Some("BO"),
	Some("BR"), Some("VG"), Some("CA"), Some("KY"), Some("CL"), Some("CO"), Some("CR"), Some("DM"),
	Some("DO"), Some("EC"), Some("SV"), Some("GF"), Some("GD"), Some("GP"), Some("GT"), Some("GY"),
	Some("HT"), Some("HN"), Some("JM"), Some("MQ"), Some("MX"), Some("MS"), Some("AN"), Some("NI"),
	Some("PA"), Some("PY"), Some("PE"), Some("KN"), Some("LC"), Some("VC"), Some("SR"), Some("TT"),
	Some("TC"), Some("US"), Some("UY"), Some("VI"), Some("VE"), None, None, None,
	None, None, None, None, None, None, None, None,
	Some("AL"), Some("AU"), Some("AT"), Some("BE"), Some("BA"), Some("BW"), Some("BG"), Some("HR"),
	Some("CY"), Some("CZ"), Some("DK"), Some("EE"), Some("FI"), Some("FR"), Some("DE"), Some("GR"),
	Some("HU"), Some("IS"), Some("IE"), Some("IT"), Some("LV"), Some("LS"), Some("LI"), Some("LT"),
	Some("LU"), Some("MK"), Some("MT"), Some("ME"), Some("MZ"), Some("NA"), Some("NL"), Some("NZ"),
	Some("NO"), Some("PL"), Some("PT"), Some("RO"), Some("RU"), Some("RS"), Some("SK"), Some("SI"),
	Some("ZA"), Some("ES"), Some("SZ"), Some("SE"), Some("CH"), Some("TR"), Some("GB"), Some("ZM"),
	Some("ZW"), Some("AZ"), Some("MR"), Some("ML"), Some("NE"), Some("TD"), Some("SD"), Some("ER"),
	Some("DJ"), Some("SO"), Some("AD"), Some("GI"), Some("GG"), Some("IM"), Some("JE"), Some("MC"),
	Some("TW"), None, None, None, None, None, None, None,
	Some("KR"), None, None, None, None, None, None, None,
	Some("HK"), Some("MO"), None, None, None, None, None, None,
	Some("ID"), Some("SG"), Some("TH"), Some("PH"), Some("MY"), None, None, None,
	Some("CN"), None, None, None, None, None, None, None,
	Some("AE"), None, Some("EG"), Some("OM"), Some("QA"), Some("KW"), Some("SA"), Some("SY"),
	Some("BH"), Some("JO"), None, None, None, None, None, None,
	Some("SM"), Some("VA"), Some("BM"), Some("IN"), None, None, None, None,
	Some("NG"), Some("AO"), Some("GH"), None, None, None, None, None,
	None,
];
