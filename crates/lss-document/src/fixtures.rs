// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared test documents and images.

use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};

pub(crate) const PAGE_2013: &str =
    "http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15";

/// One text region with one line: a 5-point baseline with an elbow and a
/// 9-point line mask of height 40.
pub(crate) const SIMPLE_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
    <Page imageFilename="simple.png" imageWidth="200" imageHeight="200">
        <TextRegion id="r1">
            <Coords points="5,5 5,195 195,195 195,5"/>
            <TextLine id="l1">
                <Coords points="5,10 50,11 100,10 100,30 101,50 70,50 40,50 5,50 5,30"/>
                <Baseline points="5,10 10,10 15,10 20,20 25,30"/>
                <TextEquiv><Unicode>Hello</Unicode></TextEquiv>
            </TextLine>
        </TextRegion>
    </Page>
</PcGts>
"#;

/// [`SIMPLE_PAGE`] after `simplify_lines(0.10)` and `simplify_masks(0.20)`.
pub(crate) const SIMPLE_PAGE_SIMPLIFIED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
    <Page imageFilename="simple.png" imageWidth="200" imageHeight="200">
        <TextRegion id="r1">
            <Coords points="5,5 5,195 195,195 195,5"/>
            <TextLine id="l1">
                <Coords points="5,10 100,10 101,50 5,50"/>
                <Baseline points="5,10 15,10 25,30"/>
                <TextEquiv><Unicode>Hello</Unicode></TextEquiv>
            </TextLine>
        </TextRegion>
    </Page>
</PcGts>
"#;

/// Root element without any namespace declaration.
pub(crate) const NO_NAMESPACE: &str = r#"<PcGts>
    <Page imageFilename="simple.png">
        <TextRegion id="r1">
            <Coords points="5,5 5,195 195,195 195,5"/>
        </TextRegion>
    </Page>
</PcGts>"#;

/// A table region wrapping a text region, a second text region whose last
/// line has no baseline, and lines without masks that fall back to their
/// region's height.
pub(crate) const NESTED_REGIONS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<PcGts xmlns="http://schema.primaresearch.org/PAGE/gts/pagecontent/2013-07-15">
  <Metadata><Creator>test</Creator></Metadata>
  <Page imageFilename="nested.png" imageWidth="400" imageHeight="300">
    <TableRegion id="t1">
      <Coords points="0,0 400,0 400,100 0,100"/>
      <TextRegion id="t1c1">
        <Coords points="10,10 190,10 190,30 10,30"/>
        <TextLine id="t1c1l1">
          <Baseline points="10,25 60,27 110,25 160,27 190,25"/>
          <Word id="w1"><Coords points="10,10 60,10 60,30 10,30"/></Word>
        </TextLine>
      </TextRegion>
    </TableRegion>
    <TextRegion id="r2">
      <Coords points="0,150 400,150 400,250 0,250"/>
      <TextLine id="r2l1">
        <Baseline points="0,200 100,201 200,200 300,202 400,200"/>
      </TextLine>
      <TextLine id="r2l2">
        <Coords points="0,210 400,210 400,240 0,240"/>
      </TextLine>
    </TextRegion>
  </Page>
</PcGts>
"#;

/// Write a plain white PNG of the given size into `dir`.
pub(crate) fn write_background(dir: &Path, width: u32, height: u32) -> PathBuf {
    let path = dir.join("background.png");
    RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
        .save(&path)
        .expect("write background image");
    path
}
