// Chart geometry for career pages.
//
// Computes the coordinates a renderer needs for a pitcher's career chart:
// WAR and year scales, WAR line points, champion notes stacked above each
// season, the award timeline, and the skill polygon with its background
// rings. No drawing happens here; the output is plain coordinates.

use crate::layout::{FontSpec, LayoutProvider};
use crate::normalize::PlayerCareer;
use crate::record::{AwardStatus, RawRecord};
use std::f64::consts::PI;

/// FIP-based WAR field.
pub const WAR_FIP: &str = "WARfip";
/// Runs-allowed-based WAR field.
pub const WAR_RA9: &str = "WARra9";

/// Stats whose league leadership is noted on the chart. The flag field for a
/// stat is `<stat>champ`.
pub const CHAMP_STATS: [&str; 8] = ["W", "ERA", "CG", "SHO", "IP", "SO", "FIP", "WHIP"];

pub const CHAMP_SIZE: f64 = 8.0;
pub const CHAMP_INTERIOR_PADDING: f64 = 1.0;

pub const AXIS_TITLE_SIZE: f64 = 15.0;
pub const AXIS_BOTTOM_PADDING: f64 = 20.0;

pub const AWARD_SIZE: f64 = 10.0;
pub const AWARD_INTERIOR_PADDING: f64 = 2.0;
pub const AWARD_RADIUS_WON: f64 = 3.0;
pub const AWARD_RADIUS_NOT_WON: f64 = 1.0;

pub const TITLE_FONT: FontSpec = FontSpec::sans(20.0);
pub const AXIS_TITLE_FONT: FontSpec = FontSpec::sans(AXIS_TITLE_SIZE);
pub const CHAMP_FONT: FontSpec = FontSpec::sans(CHAMP_SIZE);
pub const AWARD_FONT: FontSpec = FontSpec::sans(AWARD_SIZE);

/// Awards drawn on the timeline: display name and field key.
pub const AWARDS: [(&str, &str); 5] = [
    ("All Star", "as"),
    ("World Series", "ws"),
    ("Gold Glove", "gg"),
    ("MVP", "mvp"),
    ("Cy Young", "cy"),
];

// ---------------------------------------------------------------------------
// Chart frame
// ---------------------------------------------------------------------------

/// Size and inner padding of a career chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartFrame {
    pub width: f64,
    pub height: f64,
    pub padding_top: f64,
    pub padding_bottom: f64,
    pub padding_left: f64,
    pub padding_right: f64,
}

impl Default for ChartFrame {
    fn default() -> Self {
        ChartFrame {
            width: 400.0,
            height: 250.0,
            padding_top: 30.0,
            padding_bottom: 100.0,
            padding_left: 130.0,
            padding_right: 20.0,
        }
    }
}

impl ChartFrame {
    /// Y of the horizontal axis.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding_bottom
    }

    /// Top of the award timeline, below the year axis title.
    pub fn award_base_y(&self) -> f64 {
        self.baseline() + AXIS_TITLE_SIZE + AXIS_BOTTOM_PADDING + 10.0
    }

    /// Right edge of the award labels.
    pub fn award_base_x(&self) -> f64 {
        self.padding_left - 5.0
    }
}

// ---------------------------------------------------------------------------
// Scales
// ---------------------------------------------------------------------------

/// Linear map from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    pub domain: (f64, f64),
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        LinearScale { domain, range }
    }

    /// Map a domain value; a degenerate domain maps everything to the start
    /// of the range.
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }
}

/// Higher of the two WAR values recorded for a season.
fn peak_war(record: &RawRecord) -> Option<f64> {
    match (record.stat(WAR_FIP), record.stat(WAR_RA9)) {
        (Some(fip), Some(ra9)) => Some(fip.max(ra9)),
        (one, other) => one.or(other),
    }
}

/// WAR scale shared by every pitcher so charts are comparable: from zero to
/// the highest single-season WAR of any pitcher.
pub fn war_scale(pitchers: &[PlayerCareer], frame: &ChartFrame) -> LinearScale {
    let max = pitchers
        .iter()
        .flat_map(|p| p.records.iter())
        .filter_map(peak_war)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
        .unwrap_or(0.0);
    LinearScale::new((0.0, max), (frame.baseline(), frame.padding_top))
}

/// Year scale spanning one player's seasons, or `None` without seasons.
pub fn year_scale(career: &PlayerCareer, frame: &ChartFrame) -> Option<LinearScale> {
    let first = career.seasons().min()?;
    let last = career.seasons().max()?;
    Some(LinearScale::new(
        (f64::from(first), f64::from(last)),
        (frame.padding_left, frame.width - frame.padding_right),
    ))
}

// ---------------------------------------------------------------------------
// Lines and totals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Points of a WAR line; seasons missing the stat are left out.
pub fn war_line(
    career: &PlayerCareer,
    key: &str,
    years: &LinearScale,
    war: &LinearScale,
) -> Vec<Point> {
    career
        .records
        .iter()
        .filter_map(|r| {
            let year = r.year.season()?;
            let value = r.stat(key)?;
            Some(Point {
                x: years.apply(f64::from(year)),
                y: war.apply(value),
            })
        })
        .collect()
}

/// Career total of a stat, rounded to one decimal.
pub fn career_war(career: &PlayerCareer, key: &str) -> f64 {
    let total: f64 = career.records.iter().filter_map(|r| r.stat(key)).sum();
    (total * 10.0).round() / 10.0
}

/// X that horizontally centers text of `text_width` in `container_width`.
pub fn center_x(container_width: f64, text_width: f64) -> f64 {
    (container_width - text_width) / 2.0
}

/// X for a title rotated -90 degrees so it centers along `container_height`.
pub fn center_rotated_x(container_height: f64, text_width: f64) -> f64 {
    -(container_height + text_width) / 2.0
}

/// X of the player's name as the chart title.
pub fn title_x<L>(career: &PlayerCareer, frame: &ChartFrame, layout: &L) -> f64
where
    L: LayoutProvider + ?Sized,
{
    center_x(frame.width, layout.text_width(&career.name, &TITLE_FONT))
}

/// X of the "Year" axis title and of the rotated "WAR" axis title.
pub fn axis_title_x<L>(frame: &ChartFrame, layout: &L) -> (f64, f64)
where
    L: LayoutProvider + ?Sized,
{
    (
        center_x(frame.width, layout.text_width("Year", &AXIS_TITLE_FONT)),
        center_rotated_x(frame.height, layout.text_width("WAR", &AXIS_TITLE_FONT)),
    )
}

// ---------------------------------------------------------------------------
// Champion notes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ChampNote {
    pub stat: &'static str,
    pub x: f64,
    pub y: f64,
}

/// Notes for the stats a pitcher led the league in during one season,
/// stacked downward from that season's peak WAR and centered on its year.
pub fn champ_notes<L>(
    record: &RawRecord,
    years: &LinearScale,
    war: &LinearScale,
    layout: &L,
) -> Vec<ChampNote>
where
    L: LayoutProvider + ?Sized,
{
    let (Some(year), Some(peak)) = (record.year.season(), peak_war(record)) else {
        return Vec::new();
    };
    let center = years.apply(f64::from(year));
    let mut y = war.apply(peak);

    let mut notes = Vec::new();
    for stat in CHAMP_STATS {
        if !record.award(&format!("{stat}champ")).is_won() {
            continue;
        }
        y += CHAMP_SIZE + CHAMP_INTERIOR_PADDING;
        notes.push(ChampNote {
            stat,
            x: center - layout.text_width(stat, &CHAMP_FONT) / 2.0,
            y,
        });
    }
    notes
}

// ---------------------------------------------------------------------------
// Award timeline
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AwardMark {
    pub year: u16,
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AwardRow {
    pub name: &'static str,
    pub key: &'static str,
    /// Label x, right-aligned so the colons line up.
    pub label_x: f64,
    pub y: f64,
    pub marks: Vec<AwardMark>,
}

/// One timeline row per award with a mark per season. Seasons where the
/// award does not apply get no mark.
pub fn award_rows<L>(
    career: &PlayerCareer,
    years: &LinearScale,
    frame: &ChartFrame,
    layout: &L,
) -> Vec<AwardRow>
where
    L: LayoutProvider + ?Sized,
{
    let mut y = frame.award_base_y() + AWARD_INTERIOR_PADDING;
    let mut rows = Vec::with_capacity(AWARDS.len());

    for (name, key) in AWARDS {
        let label = format!("{name}:");
        let marks = career
            .records
            .iter()
            .filter_map(|record| {
                let year = record.year.season()?;
                let radius = match record.award(key) {
                    AwardStatus::Won => AWARD_RADIUS_WON,
                    AwardStatus::NotWon => AWARD_RADIUS_NOT_WON,
                    AwardStatus::NotApplicable => return None,
                };
                Some(AwardMark {
                    year,
                    cx: years.apply(f64::from(year)),
                    cy: y - AWARD_SIZE / 3.0,
                    radius,
                })
            })
            .collect();

        rows.push(AwardRow {
            name,
            key,
            label_x: frame.award_base_x() - layout.text_width(&label, &AWARD_FONT),
            y,
            marks,
        });
        y += AWARD_SIZE + AWARD_INTERIOR_PADDING;
    }
    rows
}

// ---------------------------------------------------------------------------
// Skill polygon
// ---------------------------------------------------------------------------

pub const POLY_WIDTH: f64 = 250.0;
pub const POLY_HEIGHT: f64 = 250.0;
pub const POLY_SIDES: usize = 6;
pub const POLY_RING_SPACING: f64 = 10.0;
pub const POLY_RINGS: usize = 10;

/// Outer radius of the polygon: the league leader's ring.
pub const POLY_RADIUS: f64 = POLY_RINGS as f64 * POLY_RING_SPACING;

/// Default skill axes: display name and stat key.
pub const POLY_SKILLS: [(&str, &str); 6] = [
    ("Wins", "W"),
    ("ERA", "ERA"),
    ("Strikeouts", "SO"),
    ("IP", "IP"),
    ("FIP", "FIP"),
    ("HR/9", "HR9"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStyle {
    Default,
    /// League average, at half the outer radius.
    Average,
    /// League leader, the outer ring.
    Leader,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolygonRing {
    pub radius: f64,
    pub style: RingStyle,
    pub vertices: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillVertex {
    pub name: &'static str,
    pub point: Point,
    /// Label anchor on the outer ring.
    pub label: Point,
}

/// Point at `radius` and `angle` around the polygon center.
pub fn polar(radius: f64, angle: f64) -> Point {
    Point {
        x: POLY_WIDTH / 2.0 + radius * angle.cos(),
        y: POLY_HEIGHT / 2.0 + radius * angle.sin(),
    }
}

/// Vertices of a regular polygon, starting straight up and going clockwise.
pub fn regular_polygon(sides: usize, radius: f64) -> Vec<Point> {
    let step = 2.0 * PI / sides as f64;
    (0..sides)
        .map(|i| polar(radius, -PI / 2.0 + step * i as f64))
        .collect()
}

/// Background rings from the center out to the leader ring.
pub fn polygon_rings() -> Vec<PolygonRing> {
    (0..=POLY_RINGS)
        .map(|ring| {
            let style = if ring == POLY_RINGS {
                RingStyle::Leader
            } else if ring * 2 == POLY_RINGS {
                RingStyle::Average
            } else {
                RingStyle::Default
            };
            let radius = ring as f64 * POLY_RING_SPACING;
            PolygonRing {
                radius,
                style,
                vertices: regular_polygon(POLY_SIDES, radius),
            }
        })
        .collect()
}

/// Skill polygon for one season.
///
/// Each skill is scaled from the league mean (`<key>mean`, half radius) to
/// the league best (`<key>best`, full radius), clamped at the center. Skills
/// missing any of the three values sit at the center.
pub fn skill_polygon(skills: &[(&'static str, &str)], record: &RawRecord) -> Vec<SkillVertex> {
    if skills.is_empty() {
        return Vec::new();
    }
    let step = 2.0 * PI / skills.len() as f64;

    skills
        .iter()
        .enumerate()
        .map(|(i, &(name, key))| {
            let angle = -PI / 2.0 + step * i as f64;
            let radius = match (
                record.stat(key),
                record.stat(&format!("{key}mean")),
                record.stat(&format!("{key}best")),
            ) {
                (Some(value), Some(mean), Some(best)) => {
                    LinearScale::new((mean, best), (POLY_RADIUS / 2.0, POLY_RADIUS))
                        .apply(value)
                        .max(0.0)
                }
                _ => 0.0,
            };
            SkillVertex {
                name,
                point: polar(radius, angle),
                label: polar(POLY_RADIUS, angle),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayout;
    use crate::record::FieldValue;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn pitcher(name: &str, seasons: &[(u16, f64, f64)]) -> PlayerCareer {
        let mut career = PlayerCareer::new(name);
        for &(year, fip, ra9) in seasons {
            career.records.push(
                RawRecord::season(name, year)
                    .with_stat(WAR_FIP, fip)
                    .with_stat(WAR_RA9, ra9),
            );
        }
        career
    }

    #[test]
    fn linear_scale_maps_domain_onto_range() {
        let scale = LinearScale::new((0.0, 10.0), (150.0, 30.0));
        assert!(approx(scale.apply(0.0), 150.0));
        assert!(approx(scale.apply(10.0), 30.0));
        assert!(approx(scale.apply(5.0), 90.0));

        let flat = LinearScale::new((1920.0, 1920.0), (130.0, 380.0));
        assert!(approx(flat.apply(1920.0), 130.0));
    }

    #[test]
    fn war_scale_is_shared_across_pitchers() {
        let frame = ChartFrame::default();
        let pitchers = vec![
            pitcher("A", &[(1901, 5.0, 6.5), (1902, 3.0, 2.0)]),
            pitcher("B", &[(1910, 11.2, 9.0)]),
        ];
        let scale = war_scale(&pitchers, &frame);
        assert_eq!(scale.domain, (0.0, 11.2));
        assert_eq!(scale.range, (150.0, 30.0));
    }

    #[test]
    fn year_scale_spans_career() {
        let frame = ChartFrame::default();
        let career = pitcher("A", &[(1905, 1.0, 1.0), (1901, 1.0, 1.0), (1910, 1.0, 1.0)]);
        let scale = year_scale(&career, &frame).unwrap();
        assert_eq!(scale.domain, (1901.0, 1910.0));
        assert_eq!(scale.range, (130.0, 380.0));
        assert!(year_scale(&PlayerCareer::new("empty"), &frame).is_none());
    }

    #[test]
    fn war_line_skips_missing_values() {
        let frame = ChartFrame::default();
        let mut career = pitcher("A", &[(1901, 2.0, 4.0), (1903, 4.0, 0.0)]);
        career.records.insert(1, RawRecord::season("A", 1902));
        let years = year_scale(&career, &frame).unwrap();
        let war = LinearScale::new((0.0, 4.0), (150.0, 30.0));

        let line = war_line(&career, WAR_FIP, &years, &war);
        assert_eq!(line.len(), 2);
        assert!(approx(line[0].x, 130.0));
        assert!(approx(line[0].y, 90.0));
        assert!(approx(line[1].x, 380.0));
        assert!(approx(line[1].y, 30.0));
    }

    #[test]
    fn career_war_rounds_to_one_decimal() {
        let career = pitcher("A", &[(1901, 1.04, 0.0), (1902, 2.03, 0.0), (1903, 3.0, 0.0)]);
        assert!(approx(career_war(&career, WAR_FIP), 6.1));
        assert!(approx(career_war(&career, "missing"), 0.0));
    }

    #[test]
    fn champ_notes_stack_below_peak_war() {
        let layout = StaticLayout::new().with_glyph_width(0.5);
        let record = RawRecord::season("A", 1905)
            .with_stat(WAR_FIP, 8.0)
            .with_stat(WAR_RA9, 10.0)
            .with_field("Wchamp", FieldValue::Flag(true))
            .with_field("ERAchamp", FieldValue::Flag(false))
            .with_field("SOchamp", FieldValue::Number(1.0));
        let years = LinearScale::new((1900.0, 1910.0), (130.0, 380.0));
        let war = LinearScale::new((0.0, 10.0), (150.0, 30.0));

        let notes = champ_notes(&record, &years, &war, &layout);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].stat, "W");
        assert!(approx(notes[0].y, 30.0 + 9.0));
        // "W" is 1 glyph of 8 * 0.5 = 4 wide.
        assert!(approx(notes[0].x, 255.0 - 2.0));
        assert_eq!(notes[1].stat, "SO");
        assert!(approx(notes[1].y, 30.0 + 18.0));
        assert!(approx(notes[1].x, 255.0 - 4.0));
    }

    #[test]
    fn champ_notes_need_war_to_anchor() {
        let layout = StaticLayout::new();
        let record = RawRecord::season("A", 1905).with_field("Wchamp", FieldValue::Flag(true));
        let scale = LinearScale::new((0.0, 1.0), (0.0, 1.0));
        assert!(champ_notes(&record, &scale, &scale, &layout).is_empty());
    }

    #[test]
    fn award_rows_mark_each_season() {
        let layout = StaticLayout::new().with_glyph_width(0.5);
        let frame = ChartFrame::default();
        let mut career = PlayerCareer::new("A");
        career.records.push(
            RawRecord::season("A", 1900)
                .with_field("mvp", FieldValue::Flag(true))
                .with_field("cy", FieldValue::NotApplicable),
        );
        career.records.push(RawRecord::season("A", 1910));
        let years = year_scale(&career, &frame).unwrap();

        let rows = award_rows(&career, &years, &frame, &layout);
        assert_eq!(rows.len(), AWARDS.len());

        // 150 + 15 + 20 + 10 + 2
        assert!(approx(rows[0].y, 197.0));
        assert!(approx(rows[1].y, 209.0));
        // "All Star:" is 9 glyphs of 10 * 0.5.
        assert!(approx(rows[0].label_x, 125.0 - 45.0));

        let mvp = &rows[3];
        assert_eq!(mvp.key, "mvp");
        assert_eq!(mvp.marks.len(), 2);
        assert_eq!(mvp.marks[0].radius, AWARD_RADIUS_WON);
        assert_eq!(mvp.marks[1].radius, AWARD_RADIUS_NOT_WON);
        assert!(approx(mvp.marks[1].cx, 380.0));

        let cy = &rows[4];
        assert_eq!(cy.marks.len(), 1);
        assert_eq!(cy.marks[0].year, 1910);
    }

    #[test]
    fn title_is_centered() {
        let layout = StaticLayout::new().with_glyph_width(0.5);
        let frame = ChartFrame::default();
        // "Cy Young" is 8 glyphs of 20 * 0.5 = 80 wide.
        assert!(approx(title_x(&PlayerCareer::new("Cy Young"), &frame, &layout), 160.0));
        assert!(approx(center_rotated_x(250.0, 30.0), -140.0));

        // "Year" is 30 wide and "WAR" 22.5 at size 15.
        let (year_x, war_x) = axis_title_x(&frame, &layout);
        assert!(approx(year_x, 185.0));
        assert!(approx(war_x, -136.25));
    }

    #[test]
    fn regular_polygon_starts_straight_up() {
        let vertices = regular_polygon(4, 10.0);
        assert_eq!(vertices.len(), 4);
        assert!(approx(vertices[0].x, 125.0));
        assert!(approx(vertices[0].y, 115.0));
        assert!(approx(vertices[1].x, 135.0));
        assert!(approx(vertices[1].y, 125.0));
    }

    #[test]
    fn rings_emphasize_average_and_leader() {
        let rings = polygon_rings();
        assert_eq!(rings.len(), POLY_RINGS + 1);
        assert_eq!(rings[5].style, RingStyle::Average);
        assert_eq!(rings[10].style, RingStyle::Leader);
        assert_eq!(rings[3].style, RingStyle::Default);
        assert!(approx(rings[10].radius, POLY_RADIUS));
        assert_eq!(rings[10].vertices.len(), POLY_SIDES);
    }

    #[test]
    fn skill_polygon_scales_between_mean_and_best() {
        let record = RawRecord::season("A", 1913)
            .with_stat("W", 36.0)
            .with_stat("Wmean", 16.0)
            .with_stat("Wbest", 36.0)
            .with_stat("ERA", 3.0)
            .with_stat("ERAmean", 3.0)
            .with_stat("ERAbest", 1.0)
            .with_stat("SO", -100.0)
            .with_stat("SOmean", 100.0)
            .with_stat("SObest", 200.0);
        let vertices = skill_polygon(&POLY_SKILLS, &record);
        assert_eq!(vertices.len(), 6);

        // Wins at best: full radius, straight up.
        assert!(approx(vertices[0].point.x, 125.0));
        assert!(approx(vertices[0].point.y, 25.0));
        assert!(approx(vertices[0].label.y, 25.0));
        // ERA at mean: half radius.
        let era = vertices[1].point;
        let dist = ((era.x - 125.0).powi(2) + (era.y - 125.0).powi(2)).sqrt();
        assert!(approx(dist, 50.0));
        // Strikeouts far below mean clamp to the center.
        assert!(approx(vertices[2].point.x, 125.0));
        assert!(approx(vertices[2].point.y, 125.0));
        // IP has no inputs.
        assert!(approx(vertices[3].point.x, 125.0));
        assert_eq!(vertices[5].name, "HR/9");
    }
}
