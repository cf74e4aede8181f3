// Frames captured from an IM871A, start byte and FCS already stripped,
// with the FCS each one arrived with (wire order).

pub struct Sample {
    pub name: &'static str,
    pub body: &'static str,
    pub fcs: &'static str,
}

pub const SAMPLES: [Sample; 9] = [
    Sample {
        name: "payload 0",
        body: "820327442d2c5768663230028d20cb103407201d82040f26a7e808ff3449f9e9d2e4b28bd7e7c6f1c6df",
        fcs: "3885",
    },
    Sample {
        name: "payload 1",
        body: "820327442d2c5768663230028d20cd12340720519df247ff65e751662a300bc4e5c67da86477f0182637",
        fcs: "c1ab",
    },
    Sample {
        name: "payload 2",
        body: "820327442d2c5768663230028d206972dd032089aa2c0a75352edf4b64a7b908470ba6171c89e52aab8a",
        fcs: "b7ac",
    },
    Sample {
        name: "payload 3",
        body: "820327442d2c5768663230028d2086f0dd0320368763cbae145d5f6c56d0afad5f369db1e22a7e6311df",
        fcs: "e2af",
    },
    Sample {
        name: "payload 4",
        body: "820327442d2c5768663230028d2076b0dd0320c872a70560f4faef03685bcac1ac8fca34cb3ef0dbacf1",
        fcs: "229e",
    },
    Sample {
        name: "payload 5",
        body: "820327442d2c5768663230028d2079b3dd032072e1bc19a9d337d17a731fcea7733abcaa002ca6e33478",
        fcs: "02f3",
    },
    Sample {
        name: "payload 6",
        body: "820327442d2c5768663230028d207ed0dd032008a6f44c44320b0e636f694819e91b2a5f2fb1dc753191",
        fcs: "a0ee",
    },
    Sample {
        name: "payload 7",
        body: "820327442d2c5768663230028d2083e1dd0320d4e65337143ba7621f5ebf580642d40fb7d66c45dd4e19",
        fcs: "b64f",
    },
    Sample {
        name: "long payload",
        body: "82032d442d2c5768663230028d207cc2dd0320f8325c5952304521c530f237b6ee19e4cd7d6778f660152192a4751a46",
        fcs: "f667",
    },
];
