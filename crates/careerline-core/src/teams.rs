// Team logo eras.
//
// Static lookup data mapping a three-letter team code and a season to the
// logo file stem used by the rendering layer. Eras for a team are listed in
// chronological order and the first matching era wins.

/// A contiguous span of seasons during which a team used one logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoEra {
    pub min_year: u16,
    /// Last season of the era; `None` means still in use.
    pub max_year: Option<u16>,
    pub file: &'static str,
}

impl LogoEra {
    pub fn contains(&self, year: u16) -> bool {
        year >= self.min_year && self.max_year.map_or(true, |max| year <= max)
    }
}

const fn era(min_year: u16, max_year: u16, file: &'static str) -> LogoEra {
    LogoEra {
        min_year,
        max_year: Some(max_year),
        file,
    }
}

const fn since(min_year: u16, file: &'static str) -> LogoEra {
    LogoEra {
        min_year,
        max_year: None,
        file,
    }
}

static TEAM_LOGOS: &[(&str, &[LogoEra])] = &[
    (
        "BOS",
        &[
            era(1901, 1907, "bostonamericans1901-1907"),
            era(1908, 1923, "redsox1908-1924"),
            era(1924, 1960, "redsox1924-1960"),
            era(1976, 2008, "redsox1976-2008"),
        ],
    ),
    ("BRO", &[era(1952, 1957, "brooklyndodgers1952-1957")]),
    (
        "CHC",
        &[era(1918, 1918, "cubs1918"), era(1919, 1926, "cubs1919-1926")],
    ),
    ("CHW", &[era(1982, 1986, "whitesox1982-1986")]),
    (
        "CIN",
        &[
            era(1915, 1919, "reds1915-1919"),
            era(1972, 1992, "reds1972-1992"),
        ],
    ),
    // Cleveland Spiders have no logo on file; the Naps logo stands in.
    ("CLV", &[era(1890, 1898, "clevelandnaps1909")]),
    (
        "CLE",
        &[
            era(1909, 1909, "clevelandnaps1909"),
            era(1910, 1914, "clevelandnaps1910-1914"),
        ],
    ),
    (
        "DET",
        &[
            era(1905, 1907, "tigers1905-1907"),
            era(1908, 1913, "tigers1908-1913"),
            era(1914, 1915, "tigers1914-1915"),
            era(1916, 1916, "tigers1916"),
            era(1917, 1917, "tigers1917"),
            era(1918, 1920, "tigers1918-1920"),
            era(1921, 1924, "tigers1921-1924"),
            era(1925, 1925, "tigers1925"),
            era(1926, 1926, "tigers1926"),
        ],
    ),
    ("HOU", &[era(2000, 2012, "astros2000-2012")]),
    (
        "LAD",
        &[
            era(1958, 1967, "dodgers1958-1967"),
            era(1968, 1971, "dodgers1968-1971"),
        ],
    ),
    (
        "NYG",
        &[
            era(1900, 1907, "newyorkgiants1904-1907"),
            era(1908, 1908, "newyorkgiants1908"),
            era(1909, 1909, "newyorkgiants1909"),
            era(1910, 1910, "newyorkgiants1910"),
            era(1911, 1912, "newyorkgiants1911-1912"),
            era(1913, 1914, "newyorkgiants1913-1914"),
            era(1915, 1915, "newyorkgiants1915"),
            era(1916, 1916, "newyorkgiants1916"),
            era(1951, 1957, "giants1958-1976"),
        ],
    ),
    ("NYM", &[era(1962, 1992, "mets1962-1992")]),
    (
        "NYY",
        &[
            era(1915, 1946, "yankees1915-1946"),
            era(1947, 1967, "yankees1947-1967"),
            since(1968, "yankees1968-pres"),
        ],
    ),
    (
        "PHA",
        &[
            era(1901, 1901, "philadelphiaathletics1901"),
            era(1902, 1919, "philadelphiaathletics1902-1919"),
            era(1924, 1927, "philadelphiaathletics1924-1927"),
            era(1928, 1929, "philadelphiaathletics1928-1929"),
            era(1930, 1938, "philadelphiaathletics1930-1938"),
        ],
    ),
    ("PHI", &[era(1900, 1937, "phillies1900-1937")]),
    (
        "PIT",
        &[
            era(1900, 1906, "pirates1900-1906"),
            era(1907, 1907, "pirates1907"),
            era(1908, 1909, "pirates1908-1909"),
            era(1910, 1914, "pirates1910-1914"),
            era(1915, 1919, "pirates1915-1919"),
            era(1967, 1986, "pirates1967-1986"),
            era(1987, 1996, "pirates1987-1996"),
        ],
    ),
    (
        "SFG",
        &[
            era(1951, 1976, "giants1958-1976"),
            era(1983, 1993, "giants1983-1993"),
            era(1994, 1999, "giants1994-1999"),
            since(2000, "giants2000-present"),
        ],
    ),
    ("SLB", &[era(1916, 1935, "stlouisbrowns1916-1635")]),
    ("SLM", &[era(1914, 1915, "stlouisterriers1914-1915")]),
    (
        "STL",
        &[
            era(1899, 1919, "perfectos-cardinals1899-1919"),
            era(1922, 1926, "cardinals1922-1926"),
            era(1927, 1929, "cardinals1927-1928"),
            era(1956, 1966, "cardinals1956-1966"),
            era(1967, 1997, "cardinals1967-1997"),
            since(1998, "cards1998-pres"),
        ],
    ),
    ("TOR", &[era(1997, 2002, "bluejays1997-2002")]),
    (
        "WSH",
        &[
            era(1907, 1911, "washingtonsenators1907-1911"),
            era(1912, 1927, "washingtonsenators1912-1927"),
        ],
    ),
];

/// Logo eras for a three-letter team code.
pub fn eras(code: &str) -> Option<&'static [LogoEra]> {
    TEAM_LOGOS
        .iter()
        .find(|(team, _)| *team == code)
        .map(|(_, eras)| *eras)
}

/// Logo file stem for a team during a season.
///
/// Multi-team entries (e.g. `"NYY/BOS"`) use the first three characters.
pub fn logo_for(team: &str, year: u16) -> Option<&'static str> {
    let code = team.get(..3).unwrap_or(team);
    eras(code)?
        .iter()
        .find(|era| era.contains(year))
        .map(|era| era.file)
}
