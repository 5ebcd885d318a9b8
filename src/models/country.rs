//! Numeric country codes used by OpenWLANMap-compatible servers.

/// `(code, ISO-3166 alpha-2)` pairs, sorted by code.
/// 187 maps to "UK" rather than "GB"; servers have always used it that way.
const COUNTRY_CODES: &[(u16, &str)] = &[
    (1, "DE"),
    (2, "AT"),
    (3, "CH"),
    (4, "NL"),
    (5, "BE"),
    (6, "LU"),
    (7, "NO"),
    (8, "SE"),
    (9, "DK"),
    (10, "AF"),
    (12, "AL"),
    (13, "DZ"),
    (17, "AN"),
    (18, "AG"),
    (19, "AR"),
    (20, "AM"),
    (21, "AU"),
    (23, "BS"),
    (24, "BH"),
    (25, "BD"),
    (26, "BB"),
    (27, "BY"),
    (28, "BZ"),
    (29, "BJ"),
    (30, "BM"),
    (32, "BO"),
    (33, "BA"),
    (36, "BR"),
    (37, "BN"),
    (38, "BG"),
    (43, "CA"),
    (44, "CV"),
    (47, "CL"),
    (48, "CN"),
    (49, "CO"),
    (52, "CR"),
    (53, "HR"),
    (55, "CY"),
    (56, "CZ"),
    (59, "DO"),
    (60, "EC"),
    (61, "EG"),
    (66, "ET"),
    (68, "FI"),
    (69, "FR"),
    (73, "GH"),
    (75, "GR"),
    (76, "GL"),
    (77, "GD"),
    (78, "GU"),
    (79, "GT"),
    (82, "HT"),
    (83, "HN"),
    (84, "HK"),
    (85, "HU"),
    (86, "IS"),
    (87, "IN"),
    (88, "ID"),
    (89, "IR"),
    (90, "IQ"),
    (91, "IE"),
    (93, "IT"),
    (94, "JM"),
    (95, "JP"),
    (97, "JO"),
    (98, "KZ"),
    (99, "KE"),
    (102, "KR"),
    (103, "KW"),
    (104, "KG"),
    (105, "LA"),
    (106, "LV"),
    (107, "LB"),
    (108, "LS"),
    (111, "LT"),
    (115, "MY"),
    (116, "MV"),
    (118, "MT"),
    (119, "MQ"),
    (121, "MU"),
    (123, "MX"),
    (124, "MC"),
    (125, "MN"),
    (126, "MA"),
    (127, "MZ"),
    (131, "NZ"),
    (133, "NI"),
    (135, "NG"),
    (137, "OM"),
    (138, "PK"),
    (141, "PA"),
    (142, "PY"),
    (144, "PE"),
    (145, "PH"),
    (147, "PL"),
    (148, "PT"),
    (149, "PR"),
    (150, "QA"),
    (151, "RO"),
    (152, "RU"),
    (155, "SM"),
    (157, "SA"),
    (158, "SN"),
    (161, "SG"),
    (162, "SK"),
    (163, "SI"),
    (166, "ZA"),
    (167, "ES"),
    (168, "LK"),
    (169, "SD"),
    (170, "SR"),
    (172, "SY"),
    (173, "TW"),
    (174, "TJ"),
    (175, "TZ"),
    (176, "TH"),
    (179, "TT"),
    (180, "TN"),
    (181, "TR"),
    (182, "TM"),
    (185, "UA"),
    (186, "AE"),
    (187, "UK"),
    (188, "US"),
    (189, "UY"),
    (191, "VE"),
    (192, "VN"),
    (195, "ZM"),
    (196, "ZW"),
];

/// Two-letter country for a server country code, or `""` when unknown.
pub fn country_from_code(code: u16) -> &'static str {
    COUNTRY_CODES
        .binary_search_by_key(&code, |&(c, _)| c)
        .map(|idx| COUNTRY_CODES[idx].1)
        .unwrap_or("")
}
