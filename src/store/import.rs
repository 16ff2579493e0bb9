use crate::error::{MindstampsError, MsResult};
use crate::geo::Location;
use crate::model::NewMemory;
use std::io::Read;
use tracing::{debug, warn};

#[derive(Debug, Default)]
pub struct ImportReport {
    pub memories: Vec<NewMemory>,
    pub skipped: usize,
}

/// Reads memories from CSV with the header `title,story,lat,lng,place[,image]`.
///
/// Rows with a missing or out-of-range coordinate, or blank text, are skipped and counted.
pub fn read_memories<R: Read>(reader: R) -> MsResult<ImportReport> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let col = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let (Some(title_i), Some(story_i), Some(lat_i), Some(lng_i)) =
        (col("title"), col("story"), col("lat"), col("lng"))
    else {
        return Err(MindstampsError::Validation(
            "CSV needs title, story, lat and lng columns".to_string(),
        ));
    };
    let place_i = col("place");
    let image_i = col("image");

    let mut report = ImportReport::default();

    for (row_idx, result) in rdr.records().enumerate() {
        let rec = match result {
            Ok(rec) => rec,
            Err(e) => {
                warn!("[Row {}] CSV Parse Error: {}", row_idx + 1, e);
                report.skipped += 1;
                continue;
            }
        };

        let field = |i: usize| rec.get(i).unwrap_or("");
        let parse = |i: usize| field(i).parse::<f64>().ok();

        let location = match (parse(lat_i), parse(lng_i)) {
            (Some(lat), Some(lng)) => {
                Location::new(lat, lng, place_i.map(field).unwrap_or_default()).ok()
            }
            _ => None,
        };

        let memory = NewMemory {
            title: field(title_i).to_string(),
            story: field(story_i).to_string(),
            location,
            image_data: image_i.map(field).filter(|s| !s.is_empty()).map(str::to_string),
            created_at: None,
        };

        if memory.validate().is_err() {
            debug!("[Row {}] skipped: incomplete memory", row_idx + 1);
            report.skipped += 1;
            continue;
        }
        report.memories.push(memory);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_rows_and_counts_bad_ones() {
        let data = "title,story,lat,lng,place\n\
                    Beach day,Sand everywhere,33.77,-118.41,Sunset Beach\n\
                    No place,Lost,abc,1.0,Nowhere\n\
                    Too far north,Cold,95.0,0.0,Beyond\n\
                    ,Untitled,1.0,1.0,Blank\n\
                    Pancakes,Syrup,40.7589,-73.9851,\n";
        let report = read_memories(Cursor::new(data)).unwrap();
        assert_eq!(report.memories.len(), 2);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.memories[0].location.as_ref().unwrap().name, "Sunset Beach");
        assert_eq!(report.memories[1].location.as_ref().unwrap().name, "");
    }

    #[test]
    fn requires_core_columns() {
        let data = "title,story,place\nx,y,z\n";
        assert!(read_memories(Cursor::new(data)).is_err());
    }
}
